use crate::{
    synth::{
        message::{MessageQueue, SynthMessage},
        Synth,
    },
    MAX_BLOCK_SIZE,
};

/// Velocity used for sequencer and arpeggiator triggers.
pub const DEFAULT_VELOCITY: u8 = 100;

/// Trigger contract shared by every voice in the set.
///
/// All times are audio-clock frames. A trigger may be issued any time before
/// its frame (look-ahead) and still fires on that exact sample.
pub trait Instrument: Send {
    /// Attack at `at`, release `hold_frames` later.
    fn trigger(&mut self, note: Option<u8>, hold_frames: u64, at: u64) {
        self.trigger_attack(note, at);
        self.trigger_release(note, at + hold_frames.max(1));
    }

    fn trigger_attack(&mut self, note: Option<u8>, at: u64);

    fn trigger_release(&mut self, note: Option<u8>, at: u64);

    /// Drop every queued message that has not fired yet.
    fn cancel_pending(&mut self);

    fn release_all(&mut self, at: u64);

    /// Render `out.len()` frames starting at frame `block_start`.
    fn render(&mut self, out: &mut [f32], block_start: u64);

    fn is_sounding(&self) -> bool;
}

/// Wraps a [`Synth`] with a timed message queue.
///
/// `note: None` plays the instrument's own pitch (drums are tuned by the
/// voice, not the note).
pub struct Scheduled<S: Synth> {
    synth: S,
    queue: MessageQueue,
    default_note: u8,
    dropped: u64,
}

impl<S: Synth> Scheduled<S> {
    pub fn new(synth: S, default_note: u8) -> Self {
        Self {
            synth,
            queue: MessageQueue::new(),
            default_note,
            dropped: 0,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn synth(&self) -> &S {
        &self.synth
    }

    /// Messages refused because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn enqueue(&mut self, at: u64, message: SynthMessage) {
        if !self.queue.push(at, message) {
            self.dropped += 1;
        }
    }
}

impl<S: Synth> Instrument for Scheduled<S> {
    fn trigger_attack(&mut self, note: Option<u8>, at: u64) {
        let note = note.unwrap_or(self.default_note);
        self.enqueue(
            at,
            SynthMessage::NoteOn {
                note,
                velocity: DEFAULT_VELOCITY,
            },
        );
    }

    fn trigger_release(&mut self, note: Option<u8>, at: u64) {
        let note = note.unwrap_or(self.default_note);
        self.enqueue(at, SynthMessage::NoteOff { note });
    }

    fn cancel_pending(&mut self) {
        self.queue.clear();
    }

    fn release_all(&mut self, at: u64) {
        self.enqueue(at, SynthMessage::AllNotesOff);
    }

    fn render(&mut self, out: &mut [f32], block_start: u64) {
        debug_assert!(out.len() <= MAX_BLOCK_SIZE);

        let block_end = block_start + out.len() as u64;
        let mut cursor = 0;

        while let Some(timed) = self.queue.pop_due(block_end) {
            // Late messages fire at the start of the block
            let offset = timed.at.saturating_sub(block_start) as usize;
            if offset > cursor {
                self.synth.render_block(&mut out[cursor..offset]);
                cursor = offset;
            }
            self.synth.handle(timed.message);
        }

        if cursor < out.len() {
            self.synth.render_block(&mut out[cursor..]);
        }
    }

    fn is_sounding(&self) -> bool {
        self.synth.is_sounding()
    }
}

use crate::{
    graph::node::GraphNode,
    synth::{message::SynthMessage, voice::Voice, Synth},
};

/// Single-voice synth: every note-on restarts the one voice.
///
/// Drums and the bass are monophonic. A retrigger takes over the voice at the
/// new pitch and restarts the envelope from its current level. A note-off only
/// releases the voice once every note-on at its current pitch has been matched,
/// so the release of an earlier, overlapped note never cuts the newer one short.
pub struct MonoSynth<T: GraphNode> {
    voice: Voice<T>,
    note_counter: u64,
    /// Note-ons at the current pitch still waiting for their note-off.
    held: u32,
}

impl<T: GraphNode> MonoSynth<T> {
    pub fn new(graph: T, sample_rate: f32) -> Self {
        Self {
            voice: Voice::new(graph, sample_rate),
            note_counter: 0,
            held: 0,
        }
    }

    pub fn voice(&self) -> &Voice<T> {
        &self.voice
    }
}

impl<T: GraphNode> Synth for MonoSynth<T> {
    fn handle(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn { note, velocity } => {
                if self.held > 0 && self.voice.note() == note {
                    self.held += 1;
                } else {
                    self.held = 1;
                }
                self.note_counter += 1;
                self.voice.start(note, velocity, self.note_counter);
            }
            SynthMessage::NoteOff { note } => {
                if self.held > 0 && self.voice.note() == note {
                    self.held -= 1;
                    if self.held == 0 {
                        self.voice.release();
                    }
                }
            }
            SynthMessage::AllNotesOff => {
                self.held = 0;
                self.voice.release();
            }
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        if self.voice.is_active() {
            self.voice.render(out);
        } else {
            out.fill(0.0);
        }
    }

    fn is_sounding(&self) -> bool {
        self.voice.is_active()
    }
}

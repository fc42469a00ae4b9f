/*
Timed Synth Messages
====================

Triggers are scheduled ahead of time against the audio clock (frames since
the engine started), not "now". Each instrument keeps a small queue sorted by
frame; while rendering a block it splits the block at every due message so
the note starts on the exact sample.

    block [1000 .. 1128)    queue: NoteOn@1050, NoteOff@1300

    render 1000..1050  →  NoteOn  →  render 1050..1128
    NoteOff stays queued for a later block

Messages with the same frame keep their push order. A message whose frame
already passed fires at the start of the next rendered block.

Capacity
--------

The queue is allocated once with room for `QUEUE_CAPACITY` messages and
never grows, so pushing from the audio callback cannot allocate. Triggers
are pushed just in time (the step or arp tick due in the current block),
so an instrument normally holds only a few pending releases. A push into a
full queue is refused and reported to the caller.
*/

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
    AllNotesOff,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimedMessage {
    pub at: u64,
    pub message: SynthMessage,
}

pub const QUEUE_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct MessageQueue {
    pending: Vec<TimedMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(QUEUE_CAPACITY),
        }
    }

    /// Queue `message` for frame `at`. Returns `false` and drops the
    /// message when the queue is full.
    pub fn push(&mut self, at: u64, message: SynthMessage) -> bool {
        if self.pending.len() >= QUEUE_CAPACITY {
            return false;
        }
        // Insert after every message at the same frame to keep push order.
        let index = self.pending.partition_point(|m| m.at <= at);
        self.pending.insert(index, TimedMessage { at, message });
        true
    }

    /// Remove and return the earliest message scheduled before `before`.
    pub fn pop_due(&mut self, before: u64) -> Option<TimedMessage> {
        match self.pending.first() {
            Some(first) if first.at < before => Some(self.pending.remove(0)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

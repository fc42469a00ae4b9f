use crate::graph::node::{GraphNode, RenderCtx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Playing, envelope in attack/decay/sustain
    Releasing, // Key released, envelope in release phase
}

/// A single voice that can play any GraphNode
pub struct Voice<T: GraphNode> {
    note: u8,
    velocity: u8,
    state: VoiceState,
    age: u64,
    sample_rate: f32,
    graph: T,
}

impl<T: GraphNode> Voice<T> {
    pub fn new(graph: T, sample_rate: f32) -> Self {
        Self {
            note: 0,
            velocity: 0,
            state: VoiceState::Free,
            age: 0,
            sample_rate,
            graph,
        }
    }

    /// Start (or restart) the voice on `note`.
    pub fn start(&mut self, note: u8, velocity: u8, age: u64) {
        self.note = note;
        self.velocity = velocity;
        self.state = VoiceState::Active;
        self.age = age;

        let ctx = self.ctx();
        self.graph.note_on(&ctx);
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;

            let ctx = self.ctx();
            self.graph.note_off(&ctx);
        }
    }

    pub fn render(&mut self, out: &mut [f32]) {
        let ctx = self.ctx();
        self.graph.render_block(out, &ctx);

        // Releasing voices free themselves once the envelope has finished
        if self.state == VoiceState::Releasing && !self.graph.is_active() {
            self.free();
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn envelope_level(&self) -> Option<f32> {
        self.graph.envelope_level()
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.note = 0;
        self.velocity = 0;
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_note(self.sample_rate, self.note, self.velocity as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, extensions::NodeExt, oscillator::OscNode};

    fn voice() -> Voice<impl GraphNode> {
        let graph = OscNode::sawtooth().amplify(EnvNode::adsr(0.001, 0.01, 0.5, 0.002));
        Voice::new(graph, 48_000.0)
    }

    #[test]
    fn lifecycle_free_active_releasing_free() {
        let mut voice = voice();
        assert!(voice.is_free());

        voice.start(60, 100, 1);
        assert_eq!(voice.state(), VoiceState::Active);
        assert_eq!(voice.note(), 60);

        voice.release();
        assert_eq!(voice.state(), VoiceState::Releasing);

        let mut buffer = vec![0.0; 256];
        voice.render(&mut buffer);
        assert!(voice.is_free());
    }

    #[test]
    fn restart_while_active_is_not_an_error() {
        let mut voice = voice();
        voice.start(40, 100, 1);
        voice.start(45, 100, 2);
        assert_eq!(voice.note(), 45);
        assert_eq!(voice.age(), 2);
        assert_eq!(voice.state(), VoiceState::Active);
    }
}

use crate::{
    dsp::envelope::{Envelope, EnvelopeState},
    graph::node::{GraphNode, RenderCtx},
};

/// ADSR envelope as a graph node. Outputs the envelope level (0.0..1.0);
/// combine with `.amplify()` for volume or `.modulate()` for pitch.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            env: Envelope::adsr(attack, decay, sustain, release),
        }
    }

    pub fn state(&self) -> EnvelopeState {
        self.env.state()
    }
}

impl Default for EnvNode {
    fn default() -> Self {
        Self { env: Envelope::new() }
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.env.note_off(ctx);
    }

    fn envelope_level(&self) -> Option<f32> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_note_on() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut env = EnvNode::adsr(0.001, 0.1, 0.5, 0.1);
        assert!(!env.is_active());

        let mut buffer = vec![1.0; 64];
        env.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|&s| s == 0.0));

        env.note_on(&ctx);
        env.render_block(&mut buffer, &ctx);
        assert!(env.is_active());
        assert!(buffer[63] > 0.0);
        assert_eq!(env.envelope_level(), Some(buffer[63]));
    }
}

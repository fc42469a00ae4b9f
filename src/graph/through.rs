use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series: the source renders into the buffer,
then the effect processes that buffer in place.

  Through: [Source] ──→ [Effect] ──→ output

  Amplify: [Signal] ──┬──→ (×) ──→ output
           [Mod]    ──┘

The classic subtractive path used by the bass:

     OscNode::sawtooth()
         .through(FilterNode::lowpass(400.0))
         .amplify(EnvNode::adsr(0.005, 0.2, 0.8, 0.1))

Stacking two filters gives a steeper slope (two 12 dB stages = 24 dB/oct).
*/

pub struct Through<S, F> {
    source: S,
    filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.filter.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.filter.note_off(ctx);
    }

    // The effect only shapes what the source produces.
    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn envelope_level(&self) -> Option<f32> {
        self.source.envelope_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode,
    };

    fn ctx() -> RenderCtx {
        RenderCtx::from_freq(48_000.0, 440.0, 1.0)
    }

    #[test]
    fn renders_source_then_filter() {
        let mut node = OscNode::sine().through(EnvNode::adsr(0.01, 0.05, 0.6, 0.2));
        let mut buffer = vec![1.0; 128];
        node.render_block(&mut buffer, &ctx());

        assert!(buffer.iter().any(|&sample| sample != 1.0));
        assert!(buffer.iter().all(|&sample| sample.is_finite()));
    }

    #[test]
    fn activity_follows_source_envelope() {
        let ctx = ctx();
        let mut node = OscNode::sine()
            .amplify(EnvNode::adsr(0.001, 0.05, 0.6, 0.2))
            .through(FilterNode::lowpass(800.0));
        assert!(!node.is_active());

        node.note_on(&ctx);
        node.note_off(&ctx);
        assert!(node.is_active(), "still releasing");
        assert!(node.envelope_level().is_some());
    }
}

use crate::{
    dsp::modulate::block_average,
    graph::node::{GraphNode, Modulatable, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Modulate Node
=============

Connects a control signal to a parameter on another node:

    modulated_value = base_value + (block_average(modulator) × depth)

The kick uses it to sweep its own pitch:

  OscNode::sine()
      .with_frequency(50.0)
      .modulate(EnvNode::adsr(0.001, 0.05, 0.0, 0.01), OscParam::Frequency, 450.0)

See `dsp/modulate.rs` for the block-rate tradeoffs. Activity and envelope
level come from the modulated source: a pitch envelope running out must not
end the note on its own.
*/

pub struct Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    source: S,
    lfo: L,
    param: S::Param,
    depth: f32,
    lfo_buffer: Vec<f32>,
}

impl<S, L> Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    pub fn new(source: S, lfo: L, param: S::Param, depth: f32) -> Self {
        Self {
            source,
            lfo,
            param,
            depth,
            lfo_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<S, L> GraphNode for Modulate<S, L>
where
    S: GraphNode + Modulatable,
    L: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len();

        self.lfo.render_block(&mut self.lfo_buffer[..len], ctx);
        let lfo_avg = block_average(&self.lfo_buffer[..len]);

        let base_value = self.source.get_param(self.param);
        self.source
            .apply_modulation(self.param, base_value, lfo_avg * self.depth);

        self.source.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.lfo.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.lfo.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn envelope_level(&self) -> Option<f32> {
        self.source.envelope_level()
    }
}

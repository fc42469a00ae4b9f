use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/*
Amplify
=======

Sample-by-sample multiplication of a signal by a modulator:

    out[n] = signal[n] × modulator[n]

With an envelope as the modulator this is a VCA: the envelope shapes the
loudness of every voice in the box. Both sides see every note event, and the
node stays active while either side still sounds.
*/

pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn envelope_level(&self) -> Option<f32> {
        self.modulator
            .envelope_level()
            .or_else(|| self.signal.envelope_level())
    }

    // Oscillators report active forever; only the envelope side can end a note.
    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

use std::f32::consts::TAU;

use crate::graph::node::{GraphNode, RenderCtx};

/*
Two-Operator FM
===============

A modulator sine bends the phase of a carrier sine:

    out = sin(2π·φc + index · sin(2π·φm))
    fm  = fc × harmonicity

When `harmonicity` is a whole number the sidebands land on the harmonic
series and the tone stays pitched. A non-integer ratio (5.1 for the hi-hat)
scatters them inharmonically, and a large index (32 radians) spreads energy
across most of the spectrum. The result is the metallic, cymbal-like wash
the hi-hat needs; a highpass afterwards removes the low rumble.

The carrier frequency is fixed; the node ignores the note pitch.
*/

pub struct FmNode {
    carrier_hz: f32,
    harmonicity: f32,
    index: f32,
    carrier_phase: f32,
    modulator_phase: f32,
}

impl FmNode {
    pub fn new(carrier_hz: f32, harmonicity: f32, index: f32) -> Self {
        Self {
            carrier_hz,
            harmonicity,
            index,
            carrier_phase: 0.0,
            modulator_phase: 0.0,
        }
    }

    pub fn carrier_hz(&self) -> f32 {
        self.carrier_hz
    }

    pub fn index(&self) -> f32 {
        self.index
    }
}

impl GraphNode for FmNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let carrier_inc = self.carrier_hz / ctx.sample_rate;
        let modulator_inc = self.carrier_hz * self.harmonicity / ctx.sample_rate;

        for sample in out.iter_mut() {
            let modulator = (TAU * self.modulator_phase).sin();
            *sample = (TAU * self.carrier_phase + self.index * modulator).sin();

            self.carrier_phase = (self.carrier_phase + carrier_inc).fract();
            self.modulator_phase = (self.modulator_phase + modulator_inc).fract();
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.carrier_phase = 0.0;
        self.modulator_phase = 0.0;
    }
}

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
Phase-Accumulator Oscillator
============================

Every waveform here is computed from one number: the phase, a position in the
current cycle running from 0.0 to 1.0.

    phase_increment = frequency / sample_rate
    phase = fract(phase + phase_increment)   (once per sample)

At 440 Hz and 48 kHz the increment is ~0.00917, so one cycle takes ~109
samples. The waveform is then a pure function of the phase:

    sine      sin(2π · phase)           kick body
    sawtooth  2 · phase − 1             bass, lead

Noise (the snare) ignores the phase entirely and draws from a xorshift
generator. It is deterministic per oscillator instance, so renders are
reproducible.

The naive saw aliases at high pitches. For the sub-bass and
lead ranges this engine plays, the aliasing sits far above the filter
cutoffs the voices use.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorWaveform {
    Sine,
    Saw,
    Noise,
}

pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
    noise_state: u32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise_state: 0x9E37_79B9,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    pub fn noise() -> Self {
        Self::new(OscillatorWaveform::Noise)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Produce one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            OscillatorWaveform::Sine => (TAU * self.phase).sin(),
            OscillatorWaveform::Saw => 2.0 * self.phase - 1.0,
            OscillatorWaveform::Noise => self.next_noise(),
        };

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();

        value
    }

    /// Fill `destination` with the waveform at the context frequency.
    pub fn render(&mut self, destination: &mut [f32], ctx: &RenderCtx) {
        for sample in destination.iter_mut() {
            *sample = self.next_sample(ctx.frequency, ctx.sample_rate);
        }
    }

    /// Restart the cycle from phase zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn next_noise(&mut self) -> f32 {
        // xorshift32
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

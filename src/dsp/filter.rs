use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
| type      | passes       | rejects      | used by          |
| --------- | ------------ | ------------ | ---------------- |
| low-pass  | below cutoff | above cutoff | bass, lead, kick |
| high-pass | above cutoff | below cutoff | snare, hi-hat    |

Topology-preserving-transform SVF (Zavalishin / Simper). Both responses
come out of the same two integrators; the band-pass tap `v1` is what the
high-pass is built from.

    g = tan(π · cutoff / sample_rate)
    k = 2 − 2 · resonance         (k = 2 → no peak, k → 0 → self-oscillation)

Resonance is kept below 0.95 so k never reaches zero: the wobble bass sweeps
the cutoff constantly and a self-oscillating filter would scream on every
LFO cycle. Cutoff is clamped under Nyquist because tan() diverges at π/2.
*/

const MAX_RESONANCE: f32 = 0.95;
const MIN_CUTOFF_HZ: f32 = 20.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,

    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz: cutoff_hz.max(MIN_CUTOFF_HZ),
            resonance: 0.0,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    #[inline]
    fn compute_g(&self, sample_rate: f32) -> f32 {
        let nyquist_guard = sample_rate * 0.49;
        let cutoff = self.cutoff_hz.clamp(MIN_CUTOFF_HZ, nyquist_guard);
        (PI * cutoff / sample_rate).tan()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    /// Filter `buffer` in place. Coefficients are computed once per block.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let g = self.compute_g(ctx.sample_rate);
        let k = 2.0 - (2.0 * self.resonance);

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.filter_type {
                FilterType::LowPass => outputs.lowpass,
                FilterType::HighPass => outputs.highpass,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff.max(MIN_CUTOFF_HZ);
    }

    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, MAX_RESONANCE);
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
}

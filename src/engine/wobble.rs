#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::lfo::{bipolar_to_unipolar, tempo_synced_frequency, LfoPhase},
    graph::param::SharedParam,
};

/*
Wobble
======

A tempo-locked sine LFO that writes the bass filter cutoff.

    cutoff = low + (high − low) × (0.5 + 0.5 × depth × sin(2π·phase))

With the default 50..2000 Hz range, depth 1 sweeps the full range, depth 0
parks the filter in the middle (1025 Hz).

    rate   cycles per beat   at 120 bpm
    1/4    1                 2 Hz
    1/8    2                 4 Hz
    1/16   4                 8 Hz
    1/32   8                 16 Hz

The phase never resets. Changing rate or depth only changes how fast the
phase moves and how far the output swings from the centre, so there is no
discontinuity in the sweep. It keeps running whether or not the transport
plays.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WobbleRate {
    Quarter,
    #[default]
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl WobbleRate {
    pub const ALL: [WobbleRate; 4] = [
        WobbleRate::Quarter,
        WobbleRate::Eighth,
        WobbleRate::Sixteenth,
        WobbleRate::ThirtySecond,
    ];

    pub fn cycles_per_beat(self) -> u32 {
        match self {
            WobbleRate::Quarter => 1,
            WobbleRate::Eighth => 2,
            WobbleRate::Sixteenth => 4,
            WobbleRate::ThirtySecond => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WobbleRate::Quarter => "1/4",
            WobbleRate::Eighth => "1/8",
            WobbleRate::Sixteenth => "1/16",
            WobbleRate::ThirtySecond => "1/32",
        }
    }

    pub fn next(self) -> Self {
        match self {
            WobbleRate::Quarter => WobbleRate::Eighth,
            WobbleRate::Eighth => WobbleRate::Sixteenth,
            WobbleRate::Sixteenth => WobbleRate::ThirtySecond,
            WobbleRate::ThirtySecond => WobbleRate::Quarter,
        }
    }

    pub fn frequency(self, bpm: f64) -> f32 {
        tempo_synced_frequency(bpm as f32, self.cycles_per_beat() as f32)
    }
}

pub struct Wobble {
    phase: LfoPhase,
    rate: WobbleRate,
    depth: f32,
    low_hz: f32,
    high_hz: f32,
    cutoff: SharedParam,
}

impl Wobble {
    pub const DEFAULT_DEPTH: f32 = 0.8;

    /// Writes the centre of the range to `cutoff` straight away.
    pub fn new(low_hz: f32, high_hz: f32, cutoff: SharedParam) -> Self {
        let wobble = Self {
            phase: LfoPhase::new(),
            rate: WobbleRate::default(),
            depth: Self::DEFAULT_DEPTH,
            low_hz,
            high_hz,
            cutoff,
        };
        wobble.cutoff.set(wobble.value());
        wobble
    }

    pub fn set_rate(&mut self, rate: WobbleRate) {
        self.rate = rate;
    }

    pub fn rate(&self) -> WobbleRate {
        self.rate
    }

    /// Clamped to 0..1.
    pub fn set_depth(&mut self, depth: f32) {
        self.depth = if depth.is_nan() { 0.0 } else { depth.clamp(0.0, 1.0) };
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn phase(&self) -> f32 {
        self.phase.phase()
    }

    pub fn range(&self) -> (f32, f32) {
        (self.low_hz, self.high_hz)
    }

    /// Cutoff at the current phase.
    pub fn value(&self) -> f32 {
        let swing = bipolar_to_unipolar(self.depth * self.phase.sine());
        self.low_hz + (self.high_hz - self.low_hz) * swing
    }

    /// Publish the cutoff for the block about to render, then move the phase
    /// past it.
    pub fn advance(&mut self, bpm: f64, sample_rate: f32, frames: usize) {
        self.cutoff.set(self.value());
        self.phase.advance(self.rate.frequency(bpm), sample_rate, frames);
    }

    pub fn cutoff_param(&self) -> &SharedParam {
        &self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wobble() -> Wobble {
        Wobble::new(50.0, 2_000.0, SharedParam::new(0.0))
    }

    #[test]
    fn rates_follow_tempo() {
        assert_eq!(WobbleRate::Quarter.frequency(120.0), 2.0);
        assert_eq!(WobbleRate::Sixteenth.frequency(120.0), 8.0);
        assert_eq!(WobbleRate::ThirtySecond.frequency(90.0), 12.0);
    }

    #[test]
    fn starts_in_the_middle() {
        let wobble = wobble();
        assert!((wobble.cutoff_param().get() - 1_025.0).abs() < 1e-3);
    }

    #[test]
    fn sweeps_stay_inside_the_range() {
        let mut wobble = wobble();
        wobble.set_depth(1.0);
        let (mut lo, mut hi) = (f32::MAX, f32::MIN);
        for _ in 0..2_000 {
            wobble.advance(120.0, 48_000.0, 64);
            let cutoff = wobble.cutoff_param().get();
            lo = lo.min(cutoff);
            hi = hi.max(cutoff);
        }
        assert!(lo >= 50.0 - 1e-3 && hi <= 2_000.0 + 1e-3);
        assert!(lo < 60.0 && hi > 1_990.0, "lo={lo} hi={hi}");
    }

    #[test]
    fn rate_change_keeps_phase() {
        let mut wobble = wobble();
        wobble.advance(120.0, 48_000.0, 1_000);
        let before = wobble.phase();
        wobble.set_rate(WobbleRate::ThirtySecond);
        wobble.set_depth(0.3);
        assert_eq!(wobble.phase(), before);
    }

    #[test]
    fn zero_depth_parks_the_filter() {
        let mut wobble = wobble();
        wobble.set_depth(0.0);
        for _ in 0..10 {
            wobble.advance(120.0, 48_000.0, 777);
            assert!((wobble.cutoff_param().get() - 1_025.0).abs() < 1e-3);
        }
    }

    #[test]
    fn depth_is_clamped() {
        let mut wobble = wobble();
        wobble.set_depth(3.0);
        assert_eq!(wobble.depth(), 1.0);
        wobble.set_depth(-1.0);
        assert_eq!(wobble.depth(), 0.0);
    }
}

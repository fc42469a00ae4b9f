//! Low Frequency Oscillator (LFO) helpers.

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running below hearing (~0.01 Hz to ~20 Hz). Its output
is never heard directly; it moves another parameter over time. The wobble
bass is the textbook case: a sine LFO sweeping a lowpass cutoff.

Vocabulary
----------

  bipolar       Output swings -1.0 to +1.0 (the raw sine).
  unipolar      Output stays in 0.0 to 1.0.
                    unipolar = (bipolar + 1.0) / 2.0
  depth         How far the output moves away from its centre.
  tempo-synced  Frequency derived from the song tempo instead of set in Hz.


Tempo Sync
----------

A tempo-synced LFO completes a whole number of cycles per beat, so the sweep
lines up with the drums no matter the bpm:

    frequency_hz = (bpm / 60) × cycles_per_beat

    division   cycles/beat   at 140 bpm
    1/4        1             2.33 Hz
    1/8        2             4.67 Hz
    1/16       4             9.33 Hz
    1/32       8             18.67 Hz

The 1/32 wobble at fast tempos touches audio rate. Past ~20 Hz the sweep
stops sounding like a wobble and starts adding sidebands (FM/AM territory),
which is the "growl" end of the dubstep palette.


Free-Running Phase
------------------

`LfoPhase` is a bare phase accumulator in [0, 1). Changing the frequency only
changes how fast the phase advances; the phase itself is never reset. That is
what keeps rate changes click-free: the output is continuous at the moment
the rate switches, only its slope changes.
*/

use std::f32::consts::TAU;

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Frequency of an LFO locked to `cycles_per_beat` at `bpm`.
///
/// # Example
/// ```
/// use wobblebox::dsp::lfo::tempo_synced_frequency;
/// let hz = tempo_synced_frequency(120.0, 4.0);
/// assert!((hz - 8.0).abs() < 1e-6); // sixteenth-note wobble at 120 bpm
/// ```
#[inline]
pub fn tempo_synced_frequency(bpm: f32, cycles_per_beat: f32) -> f32 {
    bpm / 60.0 * cycles_per_beat
}

/// Free-running sine phase accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfoPhase {
    phase: f64,
}

impl LfoPhase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in the cycle, 0.0..1.0.
    pub fn phase(&self) -> f32 {
        self.phase as f32
    }

    /// Bipolar sine value at the current phase.
    #[inline]
    pub fn sine(&self) -> f32 {
        (TAU * self.phase as f32).sin()
    }

    /// Move the phase forward by `frames` at `frequency_hz`.
    #[inline]
    pub fn advance(&mut self, frequency_hz: f32, sample_rate: f32, frames: usize) {
        let increment = frequency_hz as f64 / sample_rate as f64 * frames as f64;
        self.phase = (self.phase + increment).fract();
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{engine::error::EngineError, engine::transport, MAX_BLOCK_SIZE};

pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
pub const DEFAULT_BPM: f64 = 120.0;
pub const DEFAULT_ANALYSER_SIZE: usize = 1024;
pub const DEFAULT_WOBBLE_LOW_HZ: f32 = 50.0;
pub const DEFAULT_WOBBLE_HIGH_HZ: f32 = 2_000.0;

const MIN_SAMPLE_RATE: f32 = 8_000.0;
const MIN_ANALYSER_SIZE: usize = 64;

/// Everything fixed at engine construction.
///
/// ```
/// use wobblebox::EngineConfig;
///
/// let config = EngineConfig::new().sample_rate(44_100.0).bpm(140.0).seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Starting tempo, clamped into 60..200 by the engine.
    pub bpm: f64,
    /// Seed for the pattern generators and the random arpeggio. `None`
    /// draws one from the OS.
    pub seed: Option<u64>,
    pub wobble_low_hz: f32,
    pub wobble_high_hz: f32,
    /// Samples per analyser window. Power of two.
    pub analyser_size: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn wobble_range(mut self, low_hz: f32, high_hz: f32) -> Self {
        self.wobble_low_hz = low_hz;
        self.wobble_high_hz = high_hz;
        self
    }

    pub fn analyser_size(mut self, size: usize) -> Self {
        self.analyser_size = size;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: String| Err(EngineError::InvalidConfig(msg));

        if !self.sample_rate.is_finite() || self.sample_rate < MIN_SAMPLE_RATE {
            return invalid(format!(
                "sample rate {} Hz is below {MIN_SAMPLE_RATE} Hz",
                self.sample_rate
            ));
        }
        if !self.bpm.is_finite() {
            return invalid(format!("tempo {} is not a number", self.bpm));
        }

        let nyquist = self.sample_rate / 2.0;
        if !(self.wobble_low_hz > 0.0
            && self.wobble_low_hz < self.wobble_high_hz
            && self.wobble_high_hz < nyquist)
        {
            return invalid(format!(
                "wobble range {}..{} Hz must be ascending and below {nyquist} Hz",
                self.wobble_low_hz, self.wobble_high_hz
            ));
        }

        if !self.analyser_size.is_power_of_two()
            || !(MIN_ANALYSER_SIZE..=MAX_BLOCK_SIZE * 8).contains(&self.analyser_size)
        {
            return invalid(format!(
                "analyser size {} must be a power of two in {MIN_ANALYSER_SIZE}..={}",
                self.analyser_size,
                MAX_BLOCK_SIZE * 8
            ));
        }

        Ok(())
    }

    /// Starting tempo after clamping.
    pub fn initial_bpm(&self) -> f64 {
        transport::clamp_bpm(self.bpm)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bpm: DEFAULT_BPM,
            seed: None,
            wobble_low_hz: DEFAULT_WOBBLE_LOW_HZ,
            wobble_high_hz: DEFAULT_WOBBLE_HIGH_HZ,
            analyser_size: DEFAULT_ANALYSER_SIZE,
        }
    }
}

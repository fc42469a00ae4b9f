//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so graph combinators can layer on orchestration and
//! modulation.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Decibel and gain conversions.
pub mod gain;
/// LFO helper math (polarity conversion, periods).
pub mod lfo;
/// Block-rate modulation helpers.
pub mod modulate;
/// Oscillator waveforms and noise sources.
pub mod oscillator;
/// Linear parameter ramps for click-free changes.
pub mod ramp;

pub use envelope::EnvelopeState;

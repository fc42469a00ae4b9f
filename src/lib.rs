pub mod dsp;
pub mod engine; // Transport, scheduling, master bus
pub mod graph; // Composable audio graph nodes
pub mod motion; // Camera motion to parameter mapping
pub mod sequencing; // Step patterns, generators, arpeggiator
pub mod synth; // Voice management and polyphony
pub mod voices;

pub use engine::{Engine, EngineConfig, EngineError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;

//! Scenario benchmarks: the stock voices and the engine as the audio
//! callback drives it.

mod engine;
mod voices;

pub use engine::bench_engine;
pub use voices::bench_voices;

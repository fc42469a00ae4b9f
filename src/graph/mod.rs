//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with ergonomics needed for
//! instrument design: note events, modulation, and block-based rendering. The
//! `extensions` module adds fluent helpers so voices can be authored with a
//! clear, chainable API.

/// Multiply two signals together (amplitude shaping).
pub mod amplify;
/// Envelope generator node exposing ADSR state.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, `.modulate()`).
pub mod extensions;
/// Topology-preserving filter node with live cutoff binding.
pub mod filter;
/// Two-operator FM source for metallic timbres.
pub mod fm;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Lock-free parameter cells written from outside the audio callback.
pub mod param;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{GraphNode, Modulatable, RenderCtx};
pub use param::SharedParam;

//! Hi-hat voice (closed).
//!
//! Metallic rather than noisy: a two-operator FM pair at 200 Hz with an
//! inharmonic 5.1 ratio and a modulation index of 32 produces a dense,
//! clangy spectrum, like struck metal. A 4 kHz high-pass keeps only the
//! shimmer, and a ~50 ms decay keeps it tight.
//!
//! # Variations
//!
//! - Longer decay = open hat
//! - Lower index = more bell, less hiss

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, fm::FmNode, GraphNode,
};

const CARRIER_HZ: f32 = 200.0;
const HARMONICITY: f32 = 5.1;
const MODULATION_INDEX: f32 = 32.0;

/// Create a closed hi-hat voice. The note pitch is ignored.
pub fn hihat() -> impl GraphNode {
    FmNode::new(CARRIER_HZ, HARMONICITY, MODULATION_INDEX)
        .amplify(EnvNode::adsr(0.001, 0.05, 0.0, 0.01))
        .through(FilterNode::highpass(4_000.0))
}

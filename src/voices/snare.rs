//! Snare drum voice.
//!
//! White noise with a fully percussive envelope (zero sustain), high-passed
//! so it cracks above the kick and bass instead of adding mud underneath.

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode, GraphNode,
};

/// Create a snare drum voice. The note pitch is ignored.
pub fn snare() -> impl GraphNode {
    OscNode::noise()
        .amplify(EnvNode::adsr(0.001, 0.2, 0.0, 0.05))
        .through(FilterNode::highpass(1_200.0))
}

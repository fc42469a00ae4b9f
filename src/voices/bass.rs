//! Wobble bass voice.
//!
//! A sawtooth through a resonant low-pass whose cutoff never sits still: it
//! is bound to a shared parameter the engine's wobble LFO rewrites every
//! block. With the cutoff swinging between ~50 Hz and ~2 kHz the saw's
//! harmonics open and close rhythmically, the classic "wub".
//!
//! # How It Works
//!
//! 1. Sawtooth oscillator tracks the note pitch (C1..C3)
//! 2. Low-pass, resonance 0.6, cutoff = wobble parameter (no glide: the
//!    LFO itself is smooth)
//! 3. Amplitude envelope with a high sustain so held notes keep wobbling

use crate::graph::{
    envelope::EnvNode, extensions::NodeExt, filter::FilterNode, oscillator::OscNode,
    param::SharedParam, GraphNode,
};

const RESONANCE: f32 = 0.6;

/// Create a bass voice whose filter follows `cutoff`.
pub fn bass(cutoff: SharedParam) -> impl GraphNode {
    OscNode::sawtooth()
        .through(
            FilterNode::lowpass(400.0)
                .with_resonance(RESONANCE)
                .with_cutoff_param(cutoff, 0.0),
        )
        .amplify(EnvNode::adsr(0.005, 0.2, 0.8, 0.1))
}

//! Kick drum voice.
//!
//! A membrane-style kick: a sine body pinned at 50 Hz whose pitch is pushed
//! up by a very fast envelope at the start of every hit. The drop from
//! ~500 Hz to the body pitch in a few tens of milliseconds is the "punch";
//! the long amplitude decay is the boom.
//!
//! # How It Works
//!
//! 1. Sine oscillator at a fixed 50 Hz, phase reset on every hit
//! 2. Pitch envelope (0.001 s attack, 0.05 s decay) adds up to 450 Hz
//! 3. Amplitude envelope: instant attack, 0.4 s decay, no sustain
//! 4. Low-pass at 1 kHz takes the edge off the click

use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::FilterNode,
    oscillator::{OscNode, OscParam},
    GraphNode,
};

pub const KICK_BODY_HZ: f32 = 50.0;
const PITCH_SWEEP_HZ: f32 = 450.0;

/// Create a kick drum voice. The note pitch is ignored.
pub fn kick() -> impl GraphNode {
    OscNode::sine()
        .with_frequency(KICK_BODY_HZ)
        .with_phase_reset()
        .modulate(
            EnvNode::adsr(0.001, 0.05, 0.0, 0.01),
            OscParam::Frequency,
            PITCH_SWEEP_HZ,
        )
        .amplify(EnvNode::adsr(0.001, 0.4, 0.0, 0.1))
        .through(FilterNode::lowpass(1_000.0))
}

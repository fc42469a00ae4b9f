use crate::motion::source::Frame;

/*
Frame Difference
================

Motion is how much the picture changed since the last frame:

    diff      = Σ over pixels ( |ΔR| + |ΔG| + |ΔB| )      alpha ignored
    intensity = min(diff / 5 000 000, 1)

At 320×240 a full-frame change of a quarter of the colour range is
enough to saturate. A hand waving in front of the camera typically lands
in 0.1..0.6.

Intensity maps linearly onto the lead filter:

    cutoff = 200 + 3000 × intensity        200 Hz still, 3200 Hz wild
*/

pub const MOTION_NORMALIZER: f64 = 5_000_000.0;

pub const MIN_CUTOFF_HZ: f32 = 200.0;
pub const CUTOFF_SPAN_HZ: f32 = 3_000.0;

/// Normalised change between two frames, 0..1. Frames of different sizes
/// can't be compared and read as no motion.
pub fn motion_intensity(prev: &Frame, cur: &Frame) -> f32 {
    if !prev.same_size(cur) {
        return 0.0;
    }

    let diff: u64 = prev
        .rgba
        .chunks_exact(4)
        .zip(cur.rgba.chunks_exact(4))
        .map(|(a, b)| {
            (0..3)
                .map(|c| a[c].abs_diff(b[c]) as u64)
                .sum::<u64>()
        })
        .sum();

    (diff as f64 / MOTION_NORMALIZER).min(1.0) as f32
}

/// Lead cutoff for a motion intensity. Input is clamped to 0..1.
pub fn map_intensity_to_frequency(intensity: f32) -> f32 {
    let intensity = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
    MIN_CUTOFF_HZ + intensity * CUTOFF_SPAN_HZ
}

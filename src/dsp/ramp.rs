use crate::MIN_TIME;

/*
Linear Parameter Ramps
======================

Jumping a gain or cutoff from one value to another between two samples is
audible: a click for gain, a "zipper" for cutoffs. A ramp moves the current
value towards a target in a straight line over a fixed time.

    step = (target - current) / (time_seconds × sample_rate)

Retargeting mid-ramp starts a fresh ramp from wherever the value is now, so
a fast stream of targets (camera motion at ~60 Hz, each with a 100 ms glide)
always produces a continuous curve.

Ramps advance per block via `advance(frames)` and return the value reached
at the end of that block. Filters take that value as their block cutoff;
channel strips interpolate gain across the block with `fill`.
*/

#[derive(Debug, Clone, Copy)]
pub struct LinearRamp {
    current: f32,
    target: f32,
    step: f32,
    remaining: u32,
    time_secs: f32,
}

impl LinearRamp {
    pub fn new(initial: f32, time_secs: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            time_secs: time_secs.max(MIN_TIME),
        }
    }

    /// Start ramping towards `target`. No-op if the target is unchanged.
    pub fn set_target(&mut self, target: f32, sample_rate: f32) {
        if target == self.target {
            return;
        }

        let samples = (self.time_secs * sample_rate).round().max(1.0);
        self.target = target;
        self.step = (target - self.current) / samples;
        self.remaining = samples as u32;
    }

    /// Advance `frames` samples and return the value reached.
    pub fn advance(&mut self, frames: usize) -> f32 {
        let frames = (frames as u32).min(self.remaining);
        self.remaining -= frames;
        if self.remaining == 0 {
            self.current = self.target;
        } else {
            self.current += self.step * frames as f32;
        }
        self.current
    }

    /// Write one interpolated value per sample into `out`.
    pub fn fill(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.advance(1);
        }
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_ramping(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_ramp_time() {
        let mut ramp = LinearRamp::new(200.0, 0.1);
        ramp.set_target(1200.0, 1_000.0);

        let halfway = ramp.advance(50);
        assert!((halfway - 700.0).abs() < 1e-3);

        assert_eq!(ramp.advance(60), 1200.0);
        assert!(!ramp.is_ramping());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut ramp = LinearRamp::new(0.0, 0.01);
        ramp.set_target(1.0, 1_000.0);
        ramp.advance(5);
        ramp.set_target(0.0, 1_000.0);

        let next = ramp.advance(1);
        assert!(next < 0.5 && next > 0.3, "got {next}");
    }

    #[test]
    fn fill_is_monotonic() {
        let mut ramp = LinearRamp::new(0.0, 0.01);
        ramp.set_target(1.0, 1_000.0);
        let mut buffer = [0.0; 16];
        ramp.fill(&mut buffer);
        assert!(buffer.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(buffer[15], 1.0);
    }
}

use crate::{graph::node::RenderCtx, MIN_TIME};

/*
ADSR Envelope
=============

Linear attack/decay/sustain/release generator driving voice amplitude and,
for the kick, pitch.

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
          A    D      S        R

Per-sample increments are derived from stage time and sample rate:

    increment = change / (time_seconds * sample_rate)

Retriggering
------------

Step sequencers retrigger drum voices constantly, often while the previous
hit is still decaying. `note_on` restarts the attack from the CURRENT level
rather than snapping to zero, so a fast hi-hat roll never produces a
discontinuity at the retrigger point. With the 1 ms attacks the drums use
the new hit still reaches full level almost instantly.

`note_off` starts the release from wherever the envelope is, including in
the middle of the attack. Release is interpolated over a fixed number of
samples computed at note-off time so the envelope lands exactly on 0.0.

Percussive voices use sustain = 0.0: after the decay the envelope sits at
zero in the Sustain stage. `is_active` stays true until a note_off arrives
and the (instant) release completes, which is why the instruments always
schedule a release after every trigger.
*/

/// Stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    stage: EnvelopeState,
    level: f32,

    attack_start_level: f32,
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new() -> Self {
        Self::adsr(0.01, 0.1, 0.7, 0.3)
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),

            stage: EnvelopeState::Idle,
            level: 0.0,
            attack_start_level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// Gate high: (re)start the attack from the current level.
    pub fn note_on(&mut self, _ctx: &RenderCtx) {
        self.attack_start_level = self.level;
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: start the release phase from the current level.
    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, EnvelopeState::Idle | EnvelopeState::Release) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance the envelope by one sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                let span = (1.0 - self.attack_start_level).max(MIN_TIME);
                self.level += span / (self.attack_time * ctx.sample_rate);

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.sustain_level;
                self.level -= (1.0 - target) / (self.decay_time * ctx.sample_rate);

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    /// True until the release has run out.
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.attack_start_level = 0.0;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Audio Oscillator
================

The raw sound source of every voice in the box.

  Sine      fundamental only         kick body
  Sawtooth  all harmonics, 1/n       bass, lead (the filter carves it)
  Noise     every frequency          snare

Pitched voices follow the note frequency from the render context. Drums pin
their own frequency with `with_frequency`, which can then be modulated (the
kick's pitch drop):

  OscNode::sine()
      .with_frequency(50.0)
      .modulate(EnvNode::adsr(0.001, 0.05, 0.0, 0.01), OscParam::Frequency, 450.0)
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// Fixed frequency (Hz). If Some, ignores ctx.frequency and uses this instead.
    base_frequency: Option<f32>,
    /// Current frequency after modulation (only used when base_frequency is Some)
    current_frequency: f32,
    /// Detune in cents. 100 cents = 1 semitone.
    detune_cents: f32,
    /// Restart the cycle on every note-on.
    phase_reset: bool,
}

/// Parameters that can be modulated on an oscillator
#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    /// Oscillator frequency in Hz
    Frequency,
    /// Detune in cents (100 cents = 1 semitone)
    Detune,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            base_frequency: None,
            current_frequency: 440.0,
            detune_cents: 0.0,
            phase_reset: false,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorBlock::sawtooth())
    }

    pub fn noise() -> Self {
        Self::new(OscillatorBlock::noise())
    }

    /// Set a fixed frequency, ignoring the note pitch from RenderCtx.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.base_frequency = Some(freq);
        self.current_frequency = freq;
        self
    }

    /// Set detune in cents (100 cents = 1 semitone).
    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }

    /// Start every note at phase zero so repeated hits sound identical.
    pub fn with_phase_reset(mut self) -> Self {
        self.phase_reset = true;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let base_freq = if self.base_frequency.is_some() {
            self.current_frequency
        } else {
            ctx.frequency
        };

        // frequency * 2^(cents/1200)
        let final_freq = if self.detune_cents != 0.0 {
            base_freq * 2.0_f32.powf(self.detune_cents / 1200.0)
        } else {
            base_freq
        };

        let modified_ctx = RenderCtx {
            frequency: final_freq,
            ..*ctx
        };
        self.osc.render(out, &modified_ctx);
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        if let Some(base) = self.base_frequency {
            self.current_frequency = base;
        }
        if self.phase_reset {
            self.osc.reset();
        }
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.base_frequency.unwrap_or(440.0),
            OscParam::Detune => self.detune_cents,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => {
                self.current_frequency = (base + modulation).clamp(20.0, 20_000.0);
            }
            OscParam::Detune => {
                self.detune_cents = (base + modulation).clamp(-200.0, 200.0);
            }
        }
    }
}

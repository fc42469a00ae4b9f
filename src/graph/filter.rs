use crate::{
    dsp::{filter::SVFilter, ramp::LinearRamp},
    graph::{
        node::{GraphNode, Modulatable, RenderCtx},
        param::SharedParam,
    },
};

/*
State-Variable Filter Node
==========================

Subtractive synthesis: start from a harmonically rich wave and take away
what you don't want.

  Lowpass   bass and lead. Lower cutoff = darker.
  Highpass  snare and hi-hat. Strips the low end so drums don't mud the bass.

Cutoff can come from three places:

  fixed        FilterNode::lowpass(800.0)
  modulated    .modulate(env, FilterParam::Cutoff, depth)   (block-rate)
  shared       .with_cutoff_param(param, glide)              (live control)

A shared cutoff is how the wobble modulator and the motion pipeline steer a
filter from outside the voice. At the start of every block the node reads
the parameter, retargets its ramp if the value moved, and uses the ramp's
position at the end of the block as the block cutoff. With a zero glide the
cutoff follows the parameter block by block; the lead uses 100 ms so camera
jitter turns into smooth sweeps.

  let wobble_bass = OscNode::sawtooth()
      .through(FilterNode::lowpass(400.0)
          .with_resonance(0.6)
          .with_cutoff_param(wobble_cutoff, 0.0));
*/

#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    Cutoff,
    Resonance,
}

pub struct FilterNode {
    filter: SVFilter,
    base_cutoff: f32,
    base_resonance: f32,
    cutoff_param: Option<(SharedParam, LinearRamp)>,
}

impl FilterNode {
    fn new(filter: SVFilter, cutoff_hz: f32) -> Self {
        Self {
            filter,
            base_cutoff: cutoff_hz,
            base_resonance: 0.0,
            cutoff_param: None,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::lowpass(cutoff_hz), cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(SVFilter::highpass(cutoff_hz), cutoff_hz)
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.filter.set_resonance(resonance);
        self.base_resonance = self.filter.resonance();
        self
    }

    /// Drive the cutoff from `param`, gliding over `glide_secs` whenever it
    /// changes. The filter starts at the parameter's current value.
    pub fn with_cutoff_param(mut self, param: SharedParam, glide_secs: f32) -> Self {
        let initial = param.get();
        self.filter.set_cutoff(initial);
        self.base_cutoff = initial;
        self.cutoff_param = Some((param, LinearRamp::new(initial, glide_secs)));
        self
    }

    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff()
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Resonance => self.base_resonance,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let final_value = base + modulation;
        match param {
            FilterParam::Cutoff => {
                self.base_cutoff = base;
                self.filter.set_cutoff(final_value.clamp(20.0, 20_000.0));
            }
            FilterParam::Resonance => {
                self.base_resonance = base;
                self.filter.set_resonance(final_value);
            }
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if let Some((param, ramp)) = &mut self.cutoff_param {
            ramp.set_target(param.get(), ctx.sample_rate);
            let cutoff = ramp.advance(out.len());
            self.base_cutoff = cutoff;
            self.filter.set_cutoff(cutoff);
        }

        self.filter.render(out, ctx);
    }
}

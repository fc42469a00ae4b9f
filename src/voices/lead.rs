//! Lead synth.
//!
//! Eight sawtooth voices sharing one low-pass on the lead bus. The filter
//! sits after the voices, not inside each one, so a single live parameter
//! (driven by camera motion) sweeps every sounding note together. The
//! cutoff glides 100 ms towards each new target.

use crate::{
    graph::{
        envelope::EnvNode,
        extensions::NodeExt,
        filter::FilterNode,
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
        param::SharedParam,
    },
    synth::{factory::VoiceFactory, message::SynthMessage, poly::PolySynth, Synth},
};

pub const LEAD_POLYPHONY: usize = 8;
pub const LEAD_GLIDE_SECS: f32 = 0.1;

// Keeps a full chord of saws under full scale before the channel fader.
const BUS_GAIN: f32 = 0.25;

/// One lead voice.
pub fn lead() -> impl GraphNode {
    OscNode::sawtooth()
        .with_detune(4.0)
        .amplify(EnvNode::adsr(0.01, 0.1, 0.6, 0.3))
}

/// Polyphonic lead with a shared, live-controlled filter.
pub struct LeadSynth<F: VoiceFactory> {
    poly: PolySynth<F>,
    filter: FilterNode,
    ctx: RenderCtx,
}

impl<F: VoiceFactory> LeadSynth<F> {
    pub fn new(factory: F, sample_rate: f32, cutoff: SharedParam) -> Self {
        Self {
            poly: PolySynth::new(factory, LEAD_POLYPHONY, sample_rate),
            filter: FilterNode::lowpass(cutoff.get()).with_cutoff_param(cutoff, LEAD_GLIDE_SECS),
            ctx: RenderCtx::from_freq(sample_rate, 0.0, 1.0),
        }
    }

    pub fn active_voices(&self) -> usize {
        self.poly.active_voices()
    }

    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff()
    }
}

impl<F: VoiceFactory> Synth for LeadSynth<F> {
    fn handle(&mut self, message: SynthMessage) {
        self.poly.handle(message);
    }

    fn render_block(&mut self, out: &mut [f32]) {
        self.poly.render_block(out);
        for sample in out.iter_mut() {
            *sample *= BUS_GAIN;
        }
        // The filter keeps gliding even while no note sounds.
        self.filter.render_block(out, &self.ctx);
    }

    fn is_sounding(&self) -> bool {
        self.poly.is_sounding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_filter_glides_towards_parameter() {
        let cutoff = SharedParam::new(200.0);
        let mut synth = LeadSynth::new(lead, 48_000.0, cutoff.clone());
        synth.handle(SynthMessage::NoteOn { note: 60, velocity: 100 });
        synth.handle(SynthMessage::NoteOn { note: 64, velocity: 100 });
        assert_eq!(synth.active_voices(), 2);

        cutoff.set(3_200.0);
        let mut out = vec![0.0; 2_400];
        synth.render_block(&mut out[..1_200]);
        let halfway = synth.cutoff();
        synth.render_block(&mut out[1_200..]);
        assert!(halfway > 200.0 && halfway < 3_200.0, "halfway={halfway}");

        let mut tail = vec![0.0; 2_048];
        synth.render_block(&mut tail);
        synth.render_block(&mut tail);
        assert!((synth.cutoff() - 3_200.0).abs() < 1e-2);
    }
}

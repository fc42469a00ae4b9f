/*
Graph Nodes
===========

Every sound in the box is a small tree of nodes rendered one block at a
time. A node fills (or reshapes) the buffer it is handed and hears about
note boundaries through `note_on` / `note_off`:

    kick   OscNode ─modulate(pitch env)─ amplify(env) ─ through(lowpass)
    snare  OscNode::noise ─ amplify(env) ─ through(highpass)
    hihat  FmNode ─ amplify(env) ─ through(highpass)
    bass   OscNode::sawtooth ─ through(lowpass ← wobble) ─ amplify(env)
    lead   OscNode::sawtooth ─ amplify(env)        (shared lowpass per bus)

Nodes never allocate in `render_block` and never see a block longer than
`MAX_BLOCK_SIZE`. Sample-accurate note timing is the caller's job: the
instrument layer splits blocks so a note event always lands on the first
frame of the block that follows it.

A node whose output has died away (envelope finished) reports
`is_active() == false`; the voice allocator uses that to reclaim voices.
*/

/// MIDI note number to Hz. A4 (69) = 440 Hz.
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// What a node needs to know to render one block.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    /// Pitch of the current note in Hz. Drum nodes with a fixed pitch
    /// ignore it.
    pub frequency: f32,
    /// 0..127, MIDI style.
    pub velocity: f32,
}

impl RenderCtx {
    /// Pitched voices: bass lane, lead keys, arpeggiator.
    pub fn from_note(sample_rate: f32, note: u8, velocity: f32) -> Self {
        Self::from_freq(sample_rate, midi_note_to_freq(note), velocity)
    }

    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
        }
    }
}

/// A node with parameters that can be pushed around at block rate.
pub trait Modulatable: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    /// Set `param` to `base + modulation` for the next block.
    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32);
}

pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    fn note_on(&mut self, _ctx: &RenderCtx) {}

    fn note_off(&mut self, _ctx: &RenderCtx) {}

    /// Level of the envelope that gates this node, if it has one.
    fn envelope_level(&self) -> Option<f32> {
        None
    }

    /// `false` once the node has gone silent for good.
    fn is_active(&self) -> bool {
        true
    }
}

impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        (**self).note_on(ctx)
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        (**self).note_off(ctx)
    }

    fn envelope_level(&self) -> Option<f32> {
        (**self).envelope_level()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midi_reference_pitches() {
        assert!((midi_note_to_freq(69) - 440.0).abs() < 1e-3);
        assert!((midi_note_to_freq(60) - 261.626).abs() < 1e-2);
        // Bottom of the bass lane
        assert!((midi_note_to_freq(24) - 32.703).abs() < 1e-2);
    }

    #[test]
    fn boxed_node_forwards_activity() {
        struct Dead;
        impl GraphNode for Dead {
            fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
                out.fill(0.0);
            }
            fn is_active(&self) -> bool {
                false
            }
        }

        let node: Box<dyn GraphNode> = Box::new(Dead);
        assert!(!node.is_active());
        assert_eq!(node.envelope_level(), None);
    }
}

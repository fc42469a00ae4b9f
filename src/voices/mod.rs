//! The five instrument voices and the fixed table that owns them.
//!
//! Each voice is a node graph built once when the engine is created. Tracks
//! are a closed enum mapped to their voice by index, so routing a trigger
//! is an array lookup, never a string match.
//!
//! ```ignore
//! use wobblebox::voices::{Track, VoiceSet};
//!
//! let mut voices = VoiceSet::new(48_000.0, wobble_cutoff, lead_cutoff);
//! voices.voice_mut(Track::Kick).trigger(None, 6_000, 0);
//! voices.set_volume(Track::HiHat, -18.0, 48_000.0);
//! ```

mod bass;
mod hihat;
mod kick;
mod lead;
mod snare;

pub use bass::bass;
pub use hihat::hihat;
pub use kick::{kick, KICK_BODY_HZ};
pub use lead::{lead, LeadSynth, LEAD_GLIDE_SECS, LEAD_POLYPHONY};
pub use snare::snare;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    engine::bus::{ChannelStrip, MasterBus},
    graph::{param::SharedParam, GraphNode, NodeExt},
    sequencing::{notes, Duration},
    synth::{instrument::Instrument, mono::MonoSynth, Scheduled},
    MAX_BLOCK_SIZE,
};

/// Every voice in the box.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Kick,
    Snare,
    HiHat,
    Bass,
    Lead,
}

impl Track {
    pub const COUNT: usize = 5;
    pub const ALL: [Track; Track::COUNT] =
        [Track::Kick, Track::Snare, Track::HiHat, Track::Bass, Track::Lead];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Track::Kick => "kick",
            Track::Snare => "snare",
            Track::HiHat => "hihat",
            Track::Bass => "bass",
            Track::Lead => "lead",
        }
    }

    /// Gate length of a sequencer trigger.
    pub fn hold(self) -> Duration {
        match self {
            Track::Kick | Track::Bass => Duration::EIGHTH,
            Track::Snare | Track::Lead => Duration::SIXTEENTH,
            Track::HiHat => Duration::THIRTY_SECOND,
        }
    }

    pub fn default_volume_db(self) -> f32 {
        match self {
            Track::Kick => -4.0,
            Track::Snare => -8.0,
            Track::HiHat => -14.0,
            Track::Bass => -6.0,
            Track::Lead => -10.0,
        }
    }

    fn default_note(self) -> u8 {
        match self {
            Track::Kick => notes::C1,
            Track::Snare => notes::D1,
            Track::HiHat => notes::Fs1,
            Track::Bass => notes::C1,
            Track::Lead => notes::C4,
        }
    }
}

/// The three drum lanes of a pattern step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrumTrack {
    Kick,
    Snare,
    HiHat,
}

impl DrumTrack {
    pub const ALL: [DrumTrack; 3] = [DrumTrack::Kick, DrumTrack::Snare, DrumTrack::HiHat];
}

impl From<DrumTrack> for Track {
    fn from(track: DrumTrack) -> Self {
        match track {
            DrumTrack::Kick => Track::Kick,
            DrumTrack::Snare => Track::Snare,
            DrumTrack::HiHat => Track::HiHat,
        }
    }
}

/// Fixed table of voices, one channel strip each.
pub struct VoiceSet {
    instruments: [Box<dyn Instrument>; Track::COUNT],
    strips: [ChannelStrip; Track::COUNT],
    scratch: Vec<f32>,
}

impl VoiceSet {
    /// Build every voice. `wobble_cutoff` drives the bass filter,
    /// `lead_cutoff` the lead bus filter.
    pub fn new(sample_rate: f32, wobble_cutoff: SharedParam, lead_cutoff: SharedParam) -> Self {
        let mono = |graph: Box<dyn GraphNode>, track: Track| -> Box<dyn Instrument> {
            Box::new(Scheduled::new(
                MonoSynth::new(graph, sample_rate),
                track.default_note(),
            ))
        };

        let instruments: [Box<dyn Instrument>; Track::COUNT] = [
            mono(kick().boxed(), Track::Kick),
            mono(snare().boxed(), Track::Snare),
            mono(hihat().boxed(), Track::HiHat),
            mono(bass(wobble_cutoff).boxed(), Track::Bass),
            Box::new(Scheduled::new(
                LeadSynth::new(lead, sample_rate, lead_cutoff),
                Track::Lead.default_note(),
            )),
        ];

        let strips = Track::ALL.map(|track| ChannelStrip::new(track.default_volume_db()));

        Self {
            instruments,
            strips,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn voice_mut(&mut self, track: Track) -> &mut dyn Instrument {
        self.instruments[track.index()].as_mut()
    }

    pub fn voice(&self, track: Track) -> &dyn Instrument {
        self.instruments[track.index()].as_ref()
    }

    /// Set a channel fader. Clamped to -30..0 dB, applied with a short ramp.
    pub fn set_volume(&mut self, track: Track, db: f32, sample_rate: f32) {
        self.strips[track.index()].set_volume_db(db, sample_rate);
    }

    pub fn volume(&self, track: Track) -> f32 {
        self.strips[track.index()].volume_db()
    }

    /// Render every voice through its strip and send it to the bus.
    pub fn render_into(&mut self, bus: &mut MasterBus, block_start: u64) {
        let len = bus.len();
        for (instrument, strip) in self.instruments.iter_mut().zip(self.strips.iter_mut()) {
            let scratch = &mut self.scratch[..len];
            instrument.render(scratch, block_start);
            strip.process(scratch);
            bus.send(scratch);
        }
    }

    /// Drop every queued trigger on every voice and release at `at`.
    pub fn silence(&mut self, at: u64) {
        for instrument in self.instruments.iter_mut() {
            instrument.cancel_pending();
            instrument.release_all(at);
        }
    }
}

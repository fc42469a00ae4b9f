//! Per-redraw copy of everything the widgets show
//!
//! Taken under the engine lock in one go, so the audio callback is held off
//! for a handful of copies and the widgets never touch the lock.

use wobblebox::{
    engine::WobbleRate,
    sequencing::{ArpMode, ArpState, BassNote, Duration, Pattern},
    voices::{DrumTrack, Track},
    Engine,
};

/// A row of the step grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lane {
    Drum(DrumTrack),
    Bass,
}

impl Lane {
    pub const ALL: [Lane; 4] = [
        Lane::Drum(DrumTrack::Kick),
        Lane::Drum(DrumTrack::Snare),
        Lane::Drum(DrumTrack::HiHat),
        Lane::Bass,
    ];

    pub fn track(self) -> Track {
        match self {
            Lane::Drum(drum) => drum.into(),
            Lane::Bass => Track::Bass,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ArpView {
    pub enabled: bool,
    pub mode: ArpMode,
    pub interval: Duration,
    pub state: ArpState,
}

#[derive(Clone, Copy, Debug)]
pub struct UiState {
    pub pattern: Pattern,
    pub current_step: Option<usize>,
    pub is_playing: bool,
    pub bpm: f64,
    pub sample_rate: f32,
    pub volumes: [f32; Track::COUNT],
    pub wobble_rate: WobbleRate,
    pub wobble_depth: f32,
    pub wobble_cutoff: f32,
    pub arp: ArpView,
    pub peak: f32,
    pub rms: f32,
}

impl UiState {
    pub fn capture(engine: &Engine) -> Self {
        let (wobble_rate, wobble_depth) = engine.wobble();
        let arp = engine.arpeggiator();
        Self {
            pattern: *engine.pattern(),
            current_step: engine.current_step(),
            is_playing: engine.is_playing(),
            bpm: engine.tempo(),
            sample_rate: engine.sample_rate(),
            volumes: Track::ALL.map(|track| engine.volume(track)),
            wobble_rate,
            wobble_depth,
            wobble_cutoff: engine.wobble_cutoff(),
            arp: ArpView {
                enabled: arp.is_enabled(),
                mode: arp.mode(),
                interval: arp.interval(),
                state: arp.state(),
            },
            peak: engine.peak(),
            rms: engine.rms(),
        }
    }

    pub fn volume(&self, track: Track) -> f32 {
        self.volumes[track.index()]
    }
}

/// Short label for a grid cell.
pub fn bass_label(note: Option<BassNote>) -> &'static str {
    note.map_or("·", BassNote::name)
}

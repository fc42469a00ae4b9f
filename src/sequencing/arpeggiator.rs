#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;

use rand::Rng;

use crate::sequencing::Duration;

/*
Arpeggiator
===========

Turns a set of held notes into a stream of single notes on its own clock.

    held      {C4, E4, G4, C5}
    Up        C4 E4 G4 C5 | C4 E4 ...
    Down      C5 G4 E4 C4 | C5 G4 ...
    UpDown    C4 E4 G4 C5 G4 E4 | C4 E4 ...
    Random    any held note, repeats allowed

Held notes are MIDI numbers, so order is pitch order (C5 is above E4).
The traversal is rebuilt from the held set on every tick; adding or
removing a note while running changes the next note, it never stops the
clock.

Timing
------

The clock counts audio frames, not sequencer steps. One tick every
`interval` (a note division at the current tempo):

    frame  0        6000      12000     18000     (1/16 at 120 bpm, 48 kHz)
           |--C4----|--E4-----|--G4-----|--C5--
           on       off/on    off/on    off/on

Each tick emits one note with a gate of exactly one interval. The clock
starts on the first frame the arpeggiator is both enabled and holding a
note, and stops the moment either condition goes away.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArpMode {
    #[default]
    Up,
    Down,
    UpDown,
    Random,
}

impl ArpMode {
    pub const ALL: [ArpMode; 4] = [ArpMode::Up, ArpMode::Down, ArpMode::UpDown, ArpMode::Random];

    pub fn name(self) -> &'static str {
        match self {
            ArpMode::Up => "up",
            ArpMode::Down => "down",
            ArpMode::UpDown => "up-down",
            ArpMode::Random => "random",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ArpMode::Up => ArpMode::Down,
            ArpMode::Down => ArpMode::UpDown,
            ArpMode::UpDown => ArpMode::Random,
            ArpMode::Random => ArpMode::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpState {
    Idle,
    Running,
}

/// One note emitted by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpNote {
    pub note: u8,
    /// Attack frame on the audio clock.
    pub at: u64,
    pub hold_frames: u64,
}

pub struct Arpeggiator {
    enabled: bool,
    mode: ArpMode,
    interval: Duration,
    held: BTreeSet<u8>,
    /// Ticks since the clock last started.
    position: usize,
    /// Fractional frame of the next tick, `None` while idle.
    next_tick: Option<f64>,
}

impl Arpeggiator {
    /// Note divisions offered for the interval.
    pub const INTERVALS: [Duration; 4] = [
        Duration::QUARTER,
        Duration::EIGHTH,
        Duration::SIXTEENTH,
        Duration::THIRTY_SECOND,
    ];

    pub fn new() -> Self {
        Self {
            enabled: false,
            mode: ArpMode::Up,
            interval: Duration::SIXTEENTH,
            held: BTreeSet::new(),
            position: 0,
            next_tick: None,
        }
    }

    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.sync_clock();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_mode(&mut self, mode: ArpMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> ArpMode {
        self.mode
    }

    /// Takes effect from the tick after the next one.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Following entry of [`Arpeggiator::INTERVALS`], wrapping.
    pub fn next_interval(interval: Duration) -> Duration {
        let index = Self::INTERVALS
            .iter()
            .position(|d| d.reduce() == interval.reduce())
            .map_or(0, |i| i + 1);
        Self::INTERVALS[index % Self::INTERVALS.len()]
    }

    pub fn note_on(&mut self, note: u8) {
        self.held.insert(note);
        self.sync_clock();
    }

    pub fn note_off(&mut self, note: u8) {
        self.held.remove(&note);
        self.sync_clock();
    }

    pub fn release_all(&mut self) {
        self.held.clear();
        self.sync_clock();
    }

    pub fn held(&self) -> impl Iterator<Item = u8> + '_ {
        self.held.iter().copied()
    }

    pub fn state(&self) -> ArpState {
        if self.enabled && !self.held.is_empty() {
            ArpState::Running
        } else {
            ArpState::Idle
        }
    }

    /// Run the clock over `frames` frames starting at `block_start`,
    /// calling `emit` for every tick that falls inside.
    pub fn render<R, F>(
        &mut self,
        block_start: u64,
        frames: usize,
        bpm: f64,
        sample_rate: f64,
        rng: &mut R,
        mut emit: F,
    ) where
        R: Rng + ?Sized,
        F: FnMut(ArpNote),
    {
        if self.state() == ArpState::Idle {
            return;
        }

        let step = self.interval.to_frames(bpm, sample_rate).max(1.0);
        let block_end = (block_start + frames as u64) as f64;
        let mut next = self.next_tick.unwrap_or(block_start as f64);

        while next < block_end {
            let at = (next.round() as u64).max(block_start);
            if let Some(note) = self.pick(rng) {
                emit(ArpNote {
                    note,
                    at,
                    hold_frames: step.round() as u64,
                });
            }
            self.position = self.position.wrapping_add(1);
            next += step;
        }

        self.next_tick = Some(next);
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<u8> {
        if self.held.is_empty() {
            return None;
        }
        match self.mode {
            ArpMode::Random => {
                let index = rng.gen_range(0..self.held.len());
                self.held.iter().nth(index).copied()
            }
            ArpMode::Up | ArpMode::Down | ArpMode::UpDown => {
                let index = cycle_index(self.mode, self.held.len(), self.position);
                self.held.iter().nth(index).copied()
            }
        }
    }

    fn sync_clock(&mut self) {
        if self.state() == ArpState::Idle {
            self.next_tick = None;
            self.position = 0;
        }
    }
}

/// Index into the ascending held set for tick `position`.
fn cycle_index(mode: ArpMode, len: usize, position: usize) -> usize {
    match mode {
        ArpMode::Down => len - 1 - position % len,
        ArpMode::UpDown if len > 2 => {
            let i = position % (2 * len - 2);
            if i < len {
                i
            } else {
                2 * len - 2 - i
            }
        }
        _ => position % len,
    }
}

impl Default for Arpeggiator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{sequencing::notes, voices::DrumTrack};

/*
Step Pattern
============

One bar of sixteenth notes. Every step is a complete record: three drum
flags and an optional bass note. There is no "unset" state to confuse with
"off"; a fresh pattern is sixteen all-empty steps.

    step   0 1 2 3 4 5 6 7 8 9 A B C D E F
    kick   x . . . . . . . x . x . . . . .
    snare  . . . . x . . . . . . . x . . .
    hihat  x . x . x . x . x . x . x . x .
    bass   C1 . . . . . . . G1 . . Bb1 . . . .

Step indices are 0..15. A larger index is a caller bug: it trips a
debug assertion and is wrapped modulo 16 in release builds.
*/

pub const STEPS: usize = 16;

/// Index wrapped into 0..STEPS.
#[inline]
pub fn wrap_step(index: usize) -> usize {
    index % STEPS
}

#[inline]
fn checked_step(index: usize) -> usize {
    debug_assert!(index < STEPS, "step index {index} out of range 0..{STEPS}");
    wrap_step(index)
}

/// The eight pitches of the bass lane, low to high.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BassNote {
    C1,
    Eb1,
    F1,
    G1,
    Bb1,
    C2,
    G2,
    C3,
}

impl BassNote {
    pub const ALL: [BassNote; 8] = [
        BassNote::C1,
        BassNote::Eb1,
        BassNote::F1,
        BassNote::G1,
        BassNote::Bb1,
        BassNote::C2,
        BassNote::G2,
        BassNote::C3,
    ];

    pub const fn midi(self) -> u8 {
        match self {
            BassNote::C1 => notes::C1,
            BassNote::Eb1 => notes::Eb1,
            BassNote::F1 => notes::F1,
            BassNote::G1 => notes::G1,
            BassNote::Bb1 => notes::Bb1,
            BassNote::C2 => notes::C2,
            BassNote::G2 => notes::G2,
            BassNote::C3 => notes::C3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BassNote::C1 => "C1",
            BassNote::Eb1 => "Eb1",
            BassNote::F1 => "F1",
            BassNote::G1 => "G1",
            BassNote::Bb1 => "Bb1",
            BassNote::C2 => "C2",
            BassNote::G2 => "G2",
            BassNote::C3 => "C3",
        }
    }

    /// Next value in the 9-value cycle: none, C1, Eb1, ..., C3, none.
    pub fn cycle(current: Option<BassNote>) -> Option<BassNote> {
        match current {
            None => Some(BassNote::ALL[0]),
            Some(note) => {
                let index = note as usize;
                BassNote::ALL.get(index + 1).copied()
            }
        }
    }
}

/// One sixteenth-note step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Step {
    pub kick: bool,
    pub snare: bool,
    pub hihat: bool,
    pub bass: Option<BassNote>,
}

impl Step {
    pub fn drum(&self, track: DrumTrack) -> bool {
        match track {
            DrumTrack::Kick => self.kick,
            DrumTrack::Snare => self.snare,
            DrumTrack::HiHat => self.hihat,
        }
    }

    pub fn set_drum(&mut self, track: DrumTrack, on: bool) {
        match track {
            DrumTrack::Kick => self.kick = on,
            DrumTrack::Snare => self.snare = on,
            DrumTrack::HiHat => self.hihat = on,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Step::default()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pattern {
    steps: [Step; STEPS],
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step; STEPS] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Step {
        self.steps[checked_step(index)]
    }

    pub fn toggle_step(&mut self, index: usize, track: DrumTrack) {
        let step = &mut self.steps[checked_step(index)];
        let on = step.drum(track);
        step.set_drum(track, !on);
    }

    pub fn set_drum(&mut self, index: usize, track: DrumTrack, on: bool) {
        self.steps[checked_step(index)].set_drum(track, on);
    }

    pub fn set_bass_note(&mut self, index: usize, note: Option<BassNote>) {
        self.steps[checked_step(index)].bass = note;
    }

    pub fn cycle_bass_note(&mut self, index: usize) {
        let step = &mut self.steps[checked_step(index)];
        step.bass = BassNote::cycle(step.bass);
    }

    pub fn clear_all(&mut self) {
        self.steps = [Step::default(); STEPS];
    }

    pub fn clear_drums(&mut self) {
        for step in &mut self.steps {
            step.kick = false;
            step.snare = false;
            step.hihat = false;
        }
    }

    pub fn clear_bass(&mut self) {
        for step in &mut self.steps {
            step.bass = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(Step::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pattern_is_sixteen_empty_steps() {
        let pattern = Pattern::new();
        assert_eq!(pattern.steps().len(), STEPS);
        assert!(pattern.is_empty());
    }

    #[test]
    fn toggle_flips_only_one_lane() {
        let mut pattern = Pattern::new();
        pattern.toggle_step(4, DrumTrack::Snare);
        assert!(pattern.step(4).snare);
        assert!(!pattern.step(4).kick);

        pattern.toggle_step(4, DrumTrack::Snare);
        assert!(pattern.is_empty());
    }

    #[test]
    fn cycle_visits_none_then_eight_pitches_in_order() {
        let mut pattern = Pattern::new();
        let mut seen = Vec::new();
        for _ in 0..9 {
            pattern.cycle_bass_note(0);
            seen.push(pattern.step(0).bass);
        }

        let mut expected: Vec<_> = BassNote::ALL.iter().copied().map(Some).collect();
        expected.push(None);
        assert_eq!(seen, expected);
    }

    #[test]
    fn nine_cycles_return_to_start_from_any_state() {
        let mut starts = vec![None];
        starts.extend(BassNote::ALL.iter().copied().map(Some));

        for start in starts {
            let mut pattern = Pattern::new();
            pattern.set_bass_note(7, start);
            for _ in 0..9 {
                pattern.cycle_bass_note(7);
            }
            assert_eq!(pattern.step(7).bass, start);
        }
    }

    #[test]
    fn scoped_clears_leave_the_other_lane_alone() {
        let mut pattern = Pattern::new();
        pattern.toggle_step(0, DrumTrack::Kick);
        pattern.set_bass_note(0, Some(BassNote::G1));

        let mut drums_cleared = pattern;
        drums_cleared.clear_drums();
        assert!(!drums_cleared.step(0).kick);
        assert_eq!(drums_cleared.step(0).bass, Some(BassNote::G1));

        let mut bass_cleared = pattern;
        bass_cleared.clear_bass();
        assert!(bass_cleared.step(0).kick);
        assert_eq!(bass_cleared.step(0).bass, None);

        pattern.clear_all();
        assert!(pattern.is_empty());
    }

    #[test]
    fn bass_pitches_ascend_over_two_octaves() {
        let midi: Vec<u8> = BassNote::ALL.iter().map(|n| n.midi()).collect();
        assert!(midi.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(midi[7] - midi[0], 24);
    }

    #[test]
    fn wrap_step_is_modulo_sixteen() {
        assert_eq!(wrap_step(16), 0);
        assert_eq!(wrap_step(17), 1);
        assert_eq!(wrap_step(15), 15);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_index_panics_in_debug() {
        let mut pattern = Pattern::new();
        pattern.toggle_step(16, DrumTrack::Kick);
    }
}

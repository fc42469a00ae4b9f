#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::{
    sequencing::pattern::{BassNote, Pattern, STEPS},
    voices::DrumTrack,
};

/*
Pattern Generator
=================

Variations, not random noise. Every generated beat starts from a hand-made
template and is nudged step by step:

    template hit   keep it with p = 0.90   (hi-hat 0.85)
    template rest  add a ghost with p = 0.05   (hi-hat 0.15)

then the backbone is forced back in, whatever the dice said:

    kick on step 0, snare on steps 4 and 12

Basslines work the same way. One of five riffs is picked uniformly; each
present note is transposed (p = 0.20) to another low pitch or dropped
(p = 0.10), and each empty step may pick up a note (p = 0.10) from a small
root/fifth/octave set.

Beats only touch the drum lanes and basslines only the bass lane, so the
two generators can be mixed freely. All randomness comes from the caller's
`Rng`; a seeded rng gives a reproducible pattern.
*/

const KEEP_HIT: f64 = 0.90;
const KEEP_HIHAT: f64 = 0.85;
const GHOST_HIT: f64 = 0.05;
const GHOST_HIHAT: f64 = 0.15;

const TRANSPOSE: f64 = 0.20;
const DELETE: f64 = 0.10;
const INSERT: f64 = 0.10;

const TRANSPOSE_CANDIDATES: [BassNote; 4] = [BassNote::C1, BassNote::Eb1, BassNote::F1, BassNote::G1];
const INSERT_CANDIDATES: [BassNote; 3] = [BassNote::C1, BassNote::G1, BassNote::C2];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeatStyle {
    Dubstep,
    Riddim,
    Trap,
    Breakbeat,
}

impl BeatStyle {
    pub const ALL: [BeatStyle; 4] = [
        BeatStyle::Dubstep,
        BeatStyle::Riddim,
        BeatStyle::Trap,
        BeatStyle::Breakbeat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BeatStyle::Dubstep => "dubstep",
            BeatStyle::Riddim => "riddim",
            BeatStyle::Trap => "trap",
            BeatStyle::Breakbeat => "breakbeat",
        }
    }

    /// Following style, wrapping around.
    pub fn next(self) -> Self {
        let index = BeatStyle::ALL.iter().position(|s| *s == self).unwrap_or(0);
        BeatStyle::ALL[(index + 1) % BeatStyle::ALL.len()]
    }

    fn template(self) -> &'static DrumTemplate {
        match self {
            BeatStyle::Dubstep => &DUBSTEP,
            BeatStyle::Riddim => &RIDDIM,
            BeatStyle::Trap => &TRAP,
            BeatStyle::Breakbeat => &BREAKBEAT,
        }
    }
}

struct DrumTemplate {
    kick: [u8; STEPS],
    snare: [u8; STEPS],
    hihat: [u8; STEPS],
}

// Half-time: kick on 1, snare on 3.
const DUBSTEP: DrumTemplate = DrumTemplate {
    kick: [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    snare: [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    hihat: [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
};

const RIDDIM: DrumTemplate = DrumTemplate {
    kick: [1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0],
    snare: [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    hihat: [0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
};

const TRAP: DrumTemplate = DrumTemplate {
    kick: [1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    snare: [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    hihat: [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
};

const BREAKBEAT: DrumTemplate = DrumTemplate {
    kick: [1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0],
    snare: [0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    hihat: [1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1],
};

const N: Option<BassNote> = None;
const C1: Option<BassNote> = Some(BassNote::C1);
const EB1: Option<BassNote> = Some(BassNote::Eb1);
const F1: Option<BassNote> = Some(BassNote::F1);
const G1: Option<BassNote> = Some(BassNote::G1);
const BB1: Option<BassNote> = Some(BassNote::Bb1);
const C2: Option<BassNote> = Some(BassNote::C2);
const G2: Option<BassNote> = Some(BassNote::G2);
const C3: Option<BassNote> = Some(BassNote::C3);

const BASSLINES: [[Option<BassNote>; STEPS]; 5] = [
    [C1, N, N, N, N, N, N, N, C1, N, N, EB1, N, N, N, N],
    [C1, N, N, C1, N, N, G1, N, N, N, F1, N, EB1, N, N, N],
    [C1, N, C2, N, N, N, C1, N, N, N, BB1, N, G1, N, N, N],
    [C1, C1, N, N, EB1, N, N, N, F1, N, N, N, G1, N, G2, N],
    [C1, N, N, N, C3, N, N, N, G1, N, N, N, C2, N, BB1, N],
];

fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability)
}

fn vary_lane<R: Rng + ?Sized>(template: &[u8; STEPS], keep: f64, ghost: f64, rng: &mut R) -> [bool; STEPS] {
    let mut lane = [false; STEPS];
    for (out, &hit) in lane.iter_mut().zip(template.iter()) {
        *out = if hit != 0 {
            chance(rng, keep)
        } else {
            chance(rng, ghost)
        };
    }
    lane
}

/// Replace the drum lanes of `pattern` with a variation of `style`.
pub fn generate_beat<R: Rng + ?Sized>(pattern: &mut Pattern, style: BeatStyle, rng: &mut R) {
    let template = style.template();
    let kick = vary_lane(&template.kick, KEEP_HIT, GHOST_HIT, rng);
    let snare = vary_lane(&template.snare, KEEP_HIT, GHOST_HIT, rng);
    let hihat = vary_lane(&template.hihat, KEEP_HIHAT, GHOST_HIHAT, rng);

    for i in 0..STEPS {
        pattern.set_drum(i, DrumTrack::Kick, kick[i]);
        pattern.set_drum(i, DrumTrack::Snare, snare[i]);
        pattern.set_drum(i, DrumTrack::HiHat, hihat[i]);
    }

    // Downbeat and backbeat are not up to chance.
    pattern.set_drum(0, DrumTrack::Kick, true);
    pattern.set_drum(4, DrumTrack::Snare, true);
    pattern.set_drum(12, DrumTrack::Snare, true);
}

/// Replace the bass lane of `pattern` with a variation of a random riff.
pub fn generate_bassline<R: Rng + ?Sized>(pattern: &mut Pattern, rng: &mut R) {
    let template = &BASSLINES[rng.gen_range(0..BASSLINES.len())];

    for (i, &note) in template.iter().enumerate() {
        let next = match note {
            Some(note) => vary_bass_note(note, rng),
            None => {
                if chance(rng, INSERT) {
                    Some(INSERT_CANDIDATES[rng.gen_range(0..INSERT_CANDIDATES.len())])
                } else {
                    None
                }
            }
        };
        pattern.set_bass_note(i, next);
    }
}

/// One roll per present note: transpose and delete are exclusive outcomes, so
/// each keeps its own probability.
fn vary_bass_note<R: Rng + ?Sized>(note: BassNote, rng: &mut R) -> Option<BassNote> {
    let roll: f64 = rng.gen();
    if roll < TRANSPOSE {
        Some(transpose(note, rng))
    } else if roll < TRANSPOSE + DELETE {
        None
    } else {
        Some(note)
    }
}

/// Pick a candidate pitch different from `note`.
fn transpose<R: Rng + ?Sized>(note: BassNote, rng: &mut R) -> BassNote {
    let others: Vec<BassNote> = TRANSPOSE_CANDIDATES
        .iter()
        .copied()
        .filter(|candidate| *candidate != note)
        .collect();
    others[rng.gen_range(0..others.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn backbone_is_always_present() {
        for style in BeatStyle::ALL {
            for seed in 0..200 {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut pattern = Pattern::new();
                generate_beat(&mut pattern, style, &mut rng);

                assert!(pattern.step(0).kick, "{style:?} seed {seed}: kick@0");
                assert!(pattern.step(4).snare, "{style:?} seed {seed}: snare@4");
                assert!(pattern.step(12).snare, "{style:?} seed {seed}: snare@12");
            }
        }
    }

    #[test]
    fn beat_leaves_bass_lane_alone() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pattern = Pattern::new();
        pattern.set_bass_note(3, Some(BassNote::Bb1));
        generate_beat(&mut pattern, BeatStyle::Trap, &mut rng);
        assert_eq!(pattern.step(3).bass, Some(BassNote::Bb1));
    }

    #[test]
    fn bassline_leaves_drums_alone() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pattern = Pattern::new();
        pattern.toggle_step(5, DrumTrack::HiHat);
        generate_bassline(&mut pattern, &mut rng);
        assert!(pattern.step(5).hihat);
        assert!(!pattern.step(5).kick);
    }

    #[test]
    fn beats_stay_close_to_their_template() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut kept = 0;
        let mut total = 0;
        for _ in 0..200 {
            let mut pattern = Pattern::new();
            generate_beat(&mut pattern, BeatStyle::Dubstep, &mut rng);
            for (i, hit) in DUBSTEP.hihat.iter().enumerate() {
                if *hit != 0 {
                    total += 1;
                    kept += pattern.step(i).hihat as usize;
                }
            }
        }
        let ratio = kept as f64 / total as f64;
        assert!((0.78..0.92).contains(&ratio), "hihat keep ratio {ratio}");
    }

    #[test]
    fn present_notes_are_transposed_and_deleted_at_their_own_rates() {
        let mut rng = StdRng::seed_from_u64(9);
        let draws = 20_000;
        let mut deleted = 0;
        let mut transposed = 0;
        for _ in 0..draws {
            match vary_bass_note(BassNote::C1, &mut rng) {
                None => deleted += 1,
                Some(BassNote::C1) => {}
                Some(_) => transposed += 1,
            }
        }
        let deleted = deleted as f64 / draws as f64;
        let transposed = transposed as f64 / draws as f64;
        assert!((0.09..0.11).contains(&deleted), "delete rate {deleted}");
        assert!((0.19..0.21).contains(&transposed), "transpose rate {transposed}");
    }

    #[test]
    fn transposed_note_always_differs() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            for note in TRANSPOSE_CANDIDATES {
                assert_ne!(transpose(note, &mut rng), note);
            }
        }
    }

    #[test]
    fn same_seed_same_pattern() {
        let make = || {
            let mut rng = StdRng::seed_from_u64(42);
            let mut pattern = Pattern::new();
            generate_beat(&mut pattern, BeatStyle::Breakbeat, &mut rng);
            generate_bassline(&mut pattern, &mut rng);
            pattern
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn styles_cycle() {
        assert_eq!(BeatStyle::Breakbeat.next(), BeatStyle::Dubstep);
        assert_eq!(BeatStyle::Dubstep.next(), BeatStyle::Riddim);
    }
}

#![allow(non_upper_case_globals)]

/*
MIDI Note Constants
===================

Readable names for MIDI note numbers. Middle C (C4) = MIDI note 60.

Naming Convention:
- Natural notes: C4, D4, E4, etc.
- Sharps: Cs4 (C#4), Ds4 (D#4), etc.
- Flats: Db4, Eb4, etc. (aliases for the same MIDI notes as sharps)

Octave Range: C1 (MIDI 24, bottom of the bass lane) to B5 (MIDI 83),
which covers the bass lane and the lead keyboard.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

`note_name` spells a number with sharps for display. The arpeggiator orders held notes by these numbers, so "C5"
always sorts above "E4".
*/

// Octave 1
pub const C1: u8 = 24;
pub const Cs1: u8 = 25;
pub const Db1: u8 = 25;
pub const D1: u8 = 26;
pub const Ds1: u8 = 27;
pub const Eb1: u8 = 27;
pub const E1: u8 = 28;
pub const F1: u8 = 29;
pub const Fs1: u8 = 30;
pub const Gb1: u8 = 30;
pub const G1: u8 = 31;
pub const Gs1: u8 = 32;
pub const Ab1: u8 = 32;
pub const A1: u8 = 33;
pub const As1: u8 = 34;
pub const Bb1: u8 = 34;
pub const B1: u8 = 35;

// Octave 2
pub const C2: u8 = 36;
pub const Cs2: u8 = 37;
pub const Db2: u8 = 37;
pub const D2: u8 = 38;
pub const Ds2: u8 = 39;
pub const Eb2: u8 = 39;
pub const E2: u8 = 40;
pub const F2: u8 = 41;
pub const Fs2: u8 = 42;
pub const Gb2: u8 = 42;
pub const G2: u8 = 43;
pub const Gs2: u8 = 44;
pub const Ab2: u8 = 44;
pub const A2: u8 = 45;
pub const As2: u8 = 46;
pub const Bb2: u8 = 46;
pub const B2: u8 = 47;

// Octave 3
pub const C3: u8 = 48;
pub const Cs3: u8 = 49;
pub const Db3: u8 = 49;
pub const D3: u8 = 50;
pub const Ds3: u8 = 51;
pub const Eb3: u8 = 51;
pub const E3: u8 = 52;
pub const F3: u8 = 53;
pub const Fs3: u8 = 54;
pub const Gb3: u8 = 54;
pub const G3: u8 = 55;
pub const Gs3: u8 = 56;
pub const Ab3: u8 = 56;
pub const A3: u8 = 57;
pub const As3: u8 = 58;
pub const Bb3: u8 = 58;
pub const B3: u8 = 59;

// Octave 4 (Middle C octave)
pub const C4: u8 = 60;
pub const Cs4: u8 = 61;
pub const Db4: u8 = 61;
pub const D4: u8 = 62;
pub const Ds4: u8 = 63;
pub const Eb4: u8 = 63;
pub const E4: u8 = 64;
pub const F4: u8 = 65;
pub const Fs4: u8 = 66;
pub const Gb4: u8 = 66;
pub const G4: u8 = 67;
pub const Gs4: u8 = 68;
pub const Ab4: u8 = 68;
pub const A4: u8 = 69;
pub const As4: u8 = 70;
pub const Bb4: u8 = 70;
pub const B4: u8 = 71;

// Octave 5
pub const C5: u8 = 72;
pub const Cs5: u8 = 73;
pub const Db5: u8 = 73;
pub const D5: u8 = 74;
pub const Ds5: u8 = 75;
pub const Eb5: u8 = 75;
pub const E5: u8 = 76;
pub const F5: u8 = 77;
pub const Fs5: u8 = 78;
pub const Gb5: u8 = 78;
pub const G5: u8 = 79;
pub const Gs5: u8 = 80;
pub const Ab5: u8 = 80;
pub const A5: u8 = 81;
pub const As5: u8 = 82;
pub const Bb5: u8 = 82;
pub const B5: u8 = 83;

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of a MIDI note in sharp spelling, e.g. `60 -> "C4"`, `27 -> "D#1"`.
pub fn note_name(note: u8) -> String {
    let octave = (note / 12) as i32 - 1;
    format!("{}{}", SHARP_NAMES[(note % 12) as usize], octave)
}

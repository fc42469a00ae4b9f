// Purpose: Musical time and note data. Patterns, note divisions, the
// generators that fill patterns and the arpeggiator that reads held notes.

pub mod arpeggiator;
pub mod duration;
pub mod generator;
pub mod notes;
pub mod pattern;

pub use arpeggiator::{ArpMode, ArpNote, ArpState, Arpeggiator};
pub use duration::Duration;
pub use generator::{generate_bassline, generate_beat, BeatStyle};
pub use pattern::{wrap_step, BassNote, Pattern, Step, STEPS};

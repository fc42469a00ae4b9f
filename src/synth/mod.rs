// Purpose: Voice management, polyphony, sample-accurate triggering
// This layer sits above graph nodes and below the instrument voices

pub mod factory;
pub mod instrument;
pub mod message;
pub mod mono;
pub mod poly;
pub mod voice;

pub use factory::VoiceFactory;
pub use instrument::{Instrument, Scheduled};
pub use message::{MessageQueue, SynthMessage, TimedMessage};
pub use mono::MonoSynth;
pub use poly::PolySynth;
pub use voice::{Voice, VoiceState};

/// Anything that reacts to note messages and renders audio.
///
/// Messages are applied immediately; timing is handled one level up by
/// [`Scheduled`], which splits blocks so each message lands on its frame.
pub trait Synth: Send {
    fn handle(&mut self, message: SynthMessage);

    /// `out.len()` never exceeds [`crate::MAX_BLOCK_SIZE`].
    fn render_block(&mut self, out: &mut [f32]);

    fn is_sounding(&self) -> bool;
}

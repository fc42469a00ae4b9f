use crate::{
    synth::{
        factory::VoiceFactory,
        message::SynthMessage,
        voice::{Voice, VoiceState},
        Synth,
    },
    MAX_BLOCK_SIZE,
};

/*
Polyphony and Voice Stealing
============================

All voices are built once from the factory; nothing is allocated while
playing. A NoteOn takes the first free voice. When every voice is busy it
steals the oldest voice already in its release tail (least audible), and
only if none is releasing the oldest sounding voice. A note-on is never
dropped, so a fast arpeggio over a sustained chord still speaks.
*/

pub struct PolySynth<F: VoiceFactory> {
    voices: Vec<Voice<F::Voice>>,
    temp_buffer: Vec<f32>,
    note_counter: u64,
}

impl<F: VoiceFactory> PolySynth<F> {
    pub fn new(factory: F, max_voices: usize, sample_rate: f32) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| Voice::new(factory.create_voice(), sample_rate))
            .collect();

        Self {
            voices,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            note_counter: 0,
        }
    }

    pub fn note_on(&mut self, note: u8, velocity: u8) {
        self.note_counter += 1;
        let age = self.note_counter;
        let idx = self.allocate_voice();
        self.voices[idx].start(note, velocity, age);
    }

    pub fn note_off(&mut self, note: u8) {
        // Oldest first so overlapping retriggers release in order
        if let Some(voice) = self
            .voices
            .iter_mut()
            .filter(|v| v.note() == note && v.state() == VoiceState::Active)
            .min_by_key(|v| v.age())
        {
            voice.release();
        }
    }

    pub fn all_notes_off(&mut self) {
        for voice in &mut self.voices {
            voice.release();
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    fn allocate_voice(&self) -> usize {
        if let Some(idx) = self.voices.iter().position(|v| v.is_free()) {
            return idx;
        }

        let oldest_in = |state: Option<VoiceState>| {
            self.voices
                .iter()
                .enumerate()
                .filter(|(_, v)| state.map_or(true, |s| v.state() == s))
                .min_by_key(|(_, v)| v.age())
                .map(|(idx, _)| idx)
        };

        oldest_in(Some(VoiceState::Releasing))
            .or_else(|| oldest_in(None))
            .unwrap_or(0)
    }
}

impl<F: VoiceFactory> Synth for PolySynth<F> {
    fn handle(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn { note, velocity } => self.note_on(note, velocity),
            SynthMessage::NoteOff { note } => self.note_off(note),
            SynthMessage::AllNotesOff => self.all_notes_off(),
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                let temp = &mut self.temp_buffer[..out.len()];
                temp.fill(0.0);
                voice.render(temp);

                for (o, v) in out.iter_mut().zip(temp.iter()) {
                    *o += v;
                }
            }
        }
    }

    fn is_sounding(&self) -> bool {
        self.voices.iter().any(|v| v.is_active())
    }
}

use crate::{
    dsp::{
        gain::{clamp_volume_db, db_to_gain},
        ramp::LinearRamp,
    },
    MAX_BLOCK_SIZE,
};

/*
Channel Strips and Master Bus
=============================

    kick  ─▶ strip ─┐
    snare ─▶ strip ─┤
    hihat ─▶ strip ─┼─▶ master bus ─▶ clamp [-1, 1] ─▶ output + analyser
    bass  ─▶ strip ─┤
    lead  ─▶ strip ─┘

A strip is a fader: volume in dB (-30..0), applied as linear gain. Fader
moves glide over 20 ms so a volume change never clicks.

The bus only sums. Voices send into it; they can't reach its buffer or
change how it is wired. After the last send, `finish` hard-limits the mix
and records peak and RMS for the meters.
*/

const FADER_SECS: f32 = 0.02;

pub struct ChannelStrip {
    volume_db: f32,
    gain: LinearRamp,
}

impl ChannelStrip {
    pub fn new(volume_db: f32) -> Self {
        let volume_db = clamp_volume_db(volume_db);
        Self {
            volume_db,
            gain: LinearRamp::new(db_to_gain(volume_db), FADER_SECS),
        }
    }

    pub fn set_volume_db(&mut self, db: f32, sample_rate: f32) {
        self.volume_db = clamp_volume_db(db);
        self.gain.set_target(db_to_gain(self.volume_db), sample_rate);
    }

    pub fn volume_db(&self) -> f32 {
        self.volume_db
    }

    pub fn process(&mut self, buf: &mut [f32]) {
        if self.gain.is_ramping() {
            for sample in buf.iter_mut() {
                *sample *= self.gain.advance(1);
            }
        } else {
            let gain = self.gain.value();
            for sample in buf.iter_mut() {
                *sample *= gain;
            }
        }
    }
}

pub struct MasterBus {
    mix: Vec<f32>,
    len: usize,
    peak: f32,
    rms: f32,
}

impl MasterBus {
    pub(crate) fn new() -> Self {
        Self {
            mix: vec![0.0; MAX_BLOCK_SIZE],
            len: 0,
            peak: 0.0,
            rms: 0.0,
        }
    }

    /// Open a block of `len` frames.
    pub(crate) fn begin(&mut self, len: usize) {
        debug_assert!(len <= MAX_BLOCK_SIZE);
        self.len = len.min(MAX_BLOCK_SIZE);
        self.mix[..self.len].fill(0.0);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn send(&mut self, signal: &[f32]) {
        for (acc, &sample) in self.mix[..self.len].iter_mut().zip(signal) {
            *acc += sample;
        }
    }

    /// Clamp the mix into `out` and update the meters.
    pub(crate) fn finish(&mut self, out: &mut [f32]) {
        let mut peak = 0.0f32;
        let mut sum_sq = 0.0f32;
        for (dst, &sample) in out.iter_mut().zip(&self.mix[..self.len]) {
            let limited = sample.clamp(-1.0, 1.0);
            peak = peak.max(limited.abs());
            sum_sq += limited * limited;
            *dst = limited;
        }
        self.peak = peak;
        self.rms = if self.len > 0 {
            (sum_sq / self.len as f32).sqrt()
        } else {
            0.0
        };
    }

    /// Peak of the last finished block.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn rms(&self) -> f32 {
        self.rms
    }
}

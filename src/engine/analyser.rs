#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::{f32::consts::PI, sync::Arc};

use rtrb::{Consumer, Producer, RingBuffer};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/*
Analyser Taps
=============

The master bus output is copied into a lock-free ring on the audio thread.
The view drains it whenever it redraws and keeps the latest window:

    audio thread          ring (4 windows)         view thread
    AnalyserTap::push ──▶ [................] ──▶ Analyser::poll
                                                 waveform()  time domain
                                                 spectrum()  Hann + FFT, dB

If the view falls behind, the tap drops samples rather than block the
callback. The spectrum is read at 48 log-spaced frequencies from 20 Hz to
Nyquist (capped at 20 kHz), one (Hz, dB) pair each.
*/

pub const SPECTRUM_BINS: usize = 48;
const SILENCE_DB: f64 = -120.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeMode {
    #[default]
    Waveform,
    Spectrum,
}

impl ScopeMode {
    pub fn toggle(self) -> Self {
        match self {
            ScopeMode::Waveform => ScopeMode::Spectrum,
            ScopeMode::Spectrum => ScopeMode::Waveform,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScopeMode::Waveform => "waveform",
            ScopeMode::Spectrum => "spectrum",
        }
    }
}

/// What the current scope mode shows.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Waveform(&'a [f32]),
    /// (frequency Hz, magnitude dB)
    Spectrum(&'a [(f64, f64)]),
}

/// Audio-thread end of the tap.
pub struct AnalyserTap {
    tx: Producer<f32>,
}

impl AnalyserTap {
    pub fn push(&mut self, block: &[f32]) {
        for &sample in block {
            if self.tx.push(sample).is_err() {
                break;
            }
        }
    }
}

/// View end of the tap.
pub struct Analyser {
    rx: Consumer<f32>,
    window: Vec<f32>,
    mode: ScopeMode,
    spectrum: Spectrum,
    fresh: bool,
}

/// Build both ends, sized for `size`-sample windows.
pub fn analyser(size: usize, sample_rate: f32) -> (AnalyserTap, Analyser) {
    let (tx, rx) = RingBuffer::new(size * 4);
    let analyser = Analyser {
        rx,
        window: vec![0.0; size],
        mode: ScopeMode::default(),
        spectrum: Spectrum::new(size, sample_rate),
        fresh: false,
    };
    (AnalyserTap { tx }, analyser)
}

impl Analyser {
    /// Drain the ring into the window. Returns how many samples arrived.
    pub fn poll(&mut self) -> usize {
        let mut received = 0;
        let size = self.window.len();
        while let Ok(sample) = self.rx.pop() {
            // Shift-free ring write: rotate once after draining.
            self.window[received % size] = sample;
            received += 1;
        }
        if received == 0 {
            return 0;
        }

        if received >= size {
            // The window holds the last `size` samples, oldest at
            // `received % size`.
            self.window.rotate_left(received % size);
        } else {
            // Only the first `received` slots are new: they were written over
            // the oldest samples, so move them to the end.
            self.window.rotate_left(received);
        }
        self.fresh = true;
        received
    }

    pub fn waveform(&self) -> &[f32] {
        &self.window
    }

    /// Magnitudes of the current window, recomputed only after new samples.
    pub fn spectrum(&mut self) -> &[(f64, f64)] {
        if self.fresh {
            self.spectrum.update(&self.window);
            self.fresh = false;
        }
        self.spectrum.data()
    }

    pub fn set_scope_mode(&mut self, mode: ScopeMode) {
        self.mode = mode;
    }

    pub fn scope_mode(&self) -> ScopeMode {
        self.mode
    }

    /// Poll, then return what the scope mode asks for.
    pub fn snapshot(&mut self) -> Scope<'_> {
        self.poll();
        match self.mode {
            ScopeMode::Waveform => Scope::Waveform(&self.window),
            ScopeMode::Spectrum => Scope::Spectrum(self.spectrum()),
        }
    }
}

struct Spectrum {
    window: Vec<f32>,
    freq_bins: Vec<f64>,
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    data: Vec<(f64, f64)>,
}

impl Spectrum {
    fn new(size: usize, sample_rate: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);

        let window: Vec<f32> = (0..size)
            .map(|i| {
                if size > 1 {
                    0.5 * (1.0 - (2.0 * PI * i as f32 / (size - 1) as f32).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(1.0) as f64;
        let min_freq = 20.0f64.min(max_freq);
        let ratio = max_freq / min_freq;
        let half = (size / 2).max(1);

        let mut freq_bins = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = min_freq * ratio.powf(t);
            let index = (freq * size as f64 / sample_rate as f64).round() as usize;
            freq_bins.push(freq);
            bin_indices.push(index.min(half - 1));
        }

        let data = freq_bins.iter().map(|&f| (f, SILENCE_DB)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); size],
            data,
        }
    }

    fn update(&mut self, samples: &[f32]) {
        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((point, &index), &freq) in self
            .data
            .iter_mut()
            .zip(&self.bin_indices)
            .zip(&self.freq_bins)
        {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            *point = (freq, 10.0 * (power as f64).log10());
        }
    }

    fn data(&self) -> &[(f64, f64)] {
        &self.data
    }
}

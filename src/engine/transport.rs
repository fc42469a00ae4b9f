use crate::sequencing::{Duration, STEPS};

/*
Transport
=========

Tempo, play state and the grid that pins steps to audio frames.

    step_secs = 60 / bpm / 4          (one sixteenth note)
    120 bpm → 0.125 s → 6000 frames at 48 kHz

The grid is an anchor and a period, both fractional frames. Step i of the
current bar lands on

    time_of(i) = round(anchor + i × step_frames)

so rounding never accumulates: bar after bar, steps stay on the exact
tempo grid. Step 16 is the bar end, where the next bar is anchored.

Tempo changes never move a step that has already been committed to a
frame. The grid is re-anchored around the next pending boundary k:

    anchor' = anchor + k × step − k × step'

which keeps time_of(k) where it was and spaces every later step by the
new period.
*/

pub const MIN_BPM: f64 = 60.0;
pub const MAX_BPM: f64 = 200.0;

/// Clamp a tempo into the supported range. NaN falls back to 120.
pub fn clamp_bpm(bpm: f64) -> f64 {
    if bpm.is_nan() {
        return 120.0;
    }
    bpm.clamp(MIN_BPM, MAX_BPM)
}

/// Length of one step in seconds.
pub fn step_duration_secs(bpm: f64) -> f64 {
    Duration::SIXTEENTH.to_seconds(bpm)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepGrid {
    pub anchor_frame: f64,
    pub step_frames: f64,
}

impl StepGrid {
    pub fn new(anchor_frame: f64, bpm: f64, sample_rate: f64) -> Self {
        Self {
            anchor_frame,
            step_frames: Duration::SIXTEENTH.to_frames(bpm, sample_rate),
        }
    }

    /// Frame of step `index` in this bar; `STEPS` is the bar end.
    pub fn time_of(&self, index: usize) -> u64 {
        self.exact_time_of(index).round().max(0.0) as u64
    }

    pub fn exact_time_of(&self, index: usize) -> f64 {
        self.anchor_frame + index as f64 * self.step_frames
    }

    /// Grid of the following bar.
    pub fn next_bar(&self) -> Self {
        Self {
            anchor_frame: self.exact_time_of(STEPS),
            step_frames: self.step_frames,
        }
    }

    /// Same boundary `index`, new period from there on.
    pub fn reanchored(&self, index: usize, step_frames: f64) -> Self {
        Self {
            anchor_frame: self.exact_time_of(index) - index as f64 * step_frames,
            step_frames,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transport {
    bpm: f64,
    sample_rate: f64,
    playing: bool,
    current_step: Option<usize>,
    grid: StepGrid,
}

impl Transport {
    pub fn new(bpm: f64, sample_rate: f64) -> Self {
        let bpm = clamp_bpm(bpm);
        Self {
            bpm,
            sample_rate,
            playing: false,
            current_step: None,
            grid: StepGrid::new(0.0, bpm, sample_rate),
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Store a clamped tempo and return it. The grid is left alone; see
    /// [`StepGrid::reanchored`].
    pub fn set_bpm(&mut self, bpm: f64) -> f64 {
        self.bpm = clamp_bpm(bpm);
        self.bpm
    }

    pub fn step_frames(&self) -> f64 {
        Duration::SIXTEENTH.to_frames(self.bpm, self.sample_rate)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// `None` while stopped.
    pub fn current_step(&self) -> Option<usize> {
        self.current_step
    }

    pub fn grid(&self) -> StepGrid {
        self.grid
    }

    pub fn set_grid(&mut self, grid: StepGrid) {
        self.grid = grid;
    }

    /// Start a bar with step 0 on `frame`.
    pub fn start(&mut self, frame: u64) {
        self.playing = true;
        self.current_step = Some(0);
        self.grid = StepGrid::new(frame as f64, self.bpm, self.sample_rate);
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.current_step = None;
    }

    pub(crate) fn enter_step(&mut self, index: usize) {
        if self.playing {
            self.current_step = Some(index);
        }
    }
}

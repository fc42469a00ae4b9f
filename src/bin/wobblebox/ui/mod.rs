//! TUI module for wobblebox
//!
//! Step grid, transport, mixer/modulation status and a scope, redrawn at
//! ~60 fps. Every key maps onto one engine call.

mod grid;
mod spectrum;
mod state;
mod transport;
mod waveform;

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use wobblebox::{
    engine::{Analyser, Scope},
    motion::MotionPipeline,
    sequencing::{notes, Arpeggiator, BeatStyle, STEPS},
    Engine,
};

use super::{app::CpalContext, camera::SyntheticCamera};

use grid::render_grid;
use spectrum::render_spectrum;
use state::{Lane, UiState};
use transport::render_transport;
use waveform::render_waveform;

const TEMPO_STEP: f64 = 5.0;
const VOLUME_STEP: f32 = 2.0;
const DEPTH_STEP: f32 = 0.25;

/// Keys 1..8: one octave of C major from C4.
const KEY_NOTES: [u8; 8] = [
    notes::C4,
    notes::D4,
    notes::E4,
    notes::F4,
    notes::G4,
    notes::A4,
    notes::B4,
    notes::C5,
];

/// Edit position in the grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cursor {
    pub step: usize,
    pub lane: usize,
}

impl Cursor {
    fn lane(&self) -> Lane {
        Lane::ALL[self.lane]
    }
}

pub struct UiApp {
    engine: Arc<Mutex<Engine>>,
    analyser: Analyser,
    ctx: CpalContext,
    motion: MotionPipeline,
    cursor: Cursor,
    next_style: BeatStyle,
    /// Lead notes held from the keyboard. Terminals report no key-up, so
    /// keys latch until pressed again.
    latched: BTreeSet<u8>,
    status: String,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        engine: Arc<Mutex<Engine>>,
        analyser: Analyser,
        ctx: CpalContext,
        motion: MotionPipeline,
    ) -> Self {
        Self {
            engine,
            analyser,
            ctx,
            motion,
            cursor: Cursor::default(),
            next_style: BeatStyle::Dubstep,
            latched: BTreeSet::new(),
            status: "press space to play".to_string(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_motion();

            let state = UiState::capture(&*self.lock()?);
            terminal.draw(|frame| self.render(frame, &state))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }

        self.motion.disable();
        self.lock()?.shutdown();
        Ok(())
    }

    fn lock(&self) -> EyreResult<MutexGuard<'_, Engine>> {
        self.engine
            .lock()
            .map_err(|_| eyre!("audio thread panicked while holding the engine"))
    }

    fn poll_motion(&mut self) {
        if !self.motion.is_enabled() {
            return;
        }
        if let Err(err) = self.motion.sample() {
            self.status = format!("motion stopped: {err}");
        }
    }

    fn handle_key(&mut self, key: KeyCode) -> EyreResult<()> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.toggle_playback()?,

            KeyCode::Left => self.cursor.step = (self.cursor.step + STEPS - 1) % STEPS,
            KeyCode::Right => self.cursor.step = (self.cursor.step + 1) % STEPS,
            KeyCode::Up => {
                self.cursor.lane = (self.cursor.lane + Lane::ALL.len() - 1) % Lane::ALL.len()
            }
            KeyCode::Down => self.cursor.lane = (self.cursor.lane + 1) % Lane::ALL.len(),
            KeyCode::Enter => {
                let step = self.cursor.step;
                match self.cursor.lane() {
                    Lane::Drum(drum) => self.lock()?.toggle_step(step, drum),
                    Lane::Bass => self.lock()?.cycle_bass_note(step),
                }
            }

            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_tempo(TEMPO_STEP)?,
            KeyCode::Char('-') | KeyCode::Char('_') => self.nudge_tempo(-TEMPO_STEP)?,

            KeyCode::Char('g') => {
                let style = self.next_style;
                self.lock()?.generate_beat(style);
                self.next_style = style.next();
                self.status = format!("generated {} beat", style.name());
            }
            KeyCode::Char('b') => {
                self.lock()?.generate_bassline();
                self.status = "generated bassline".to_string();
            }
            KeyCode::Char('c') => self.lock()?.clear_all(),
            KeyCode::Char('d') => self.lock()?.clear_drums(),
            KeyCode::Char('x') => self.lock()?.clear_bass(),

            KeyCode::Char('w') => {
                let mut engine = self.lock()?;
                let (rate, depth) = engine.wobble();
                engine.set_wobble(rate.next(), depth);
            }
            KeyCode::Char('e') => {
                let mut engine = self.lock()?;
                let (rate, depth) = engine.wobble();
                let depth = if depth >= 1.0 { 0.0 } else { (depth + DEPTH_STEP).min(1.0) };
                engine.set_wobble(rate, depth);
            }

            KeyCode::Char('a') => {
                let mut engine = self.lock()?;
                let enabled = !engine.arpeggiator().is_enabled();
                engine.enable_arpeggiator(enabled);
            }
            KeyCode::Char('m') => {
                let mut engine = self.lock()?;
                let mode = engine.arpeggiator().mode().next();
                engine.set_arp_mode(mode);
            }
            KeyCode::Char('i') => {
                let mut engine = self.lock()?;
                let interval = Arpeggiator::next_interval(engine.arpeggiator().interval());
                engine.set_arp_interval(interval);
            }
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                self.toggle_key(KEY_NOTES[index])?;
            }
            KeyCode::Char('0') => {
                self.latched.clear();
                self.lock()?.release_keys();
            }

            KeyCode::Char('[') => self.nudge_volume(-VOLUME_STEP)?,
            KeyCode::Char(']') => self.nudge_volume(VOLUME_STEP)?,

            KeyCode::Char('o') => {
                let mode = self.analyser.scope_mode().toggle();
                self.analyser.set_scope_mode(mode);
            }
            KeyCode::Char('t') => self.toggle_motion(),
            _ => {}
        }
        Ok(())
    }

    fn toggle_playback(&mut self) -> EyreResult<()> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| eyre!("audio thread panicked while holding the engine"))?;
        if engine.is_playing() {
            engine.stop();
            self.status = "stopped".to_string();
        } else {
            // A refused start is not fatal: show it and let the user retry
            self.status = match engine.start(&mut self.ctx) {
                Ok(()) => "playing".to_string(),
                Err(err) => format!("{err} (press space to retry)"),
            };
        }
        Ok(())
    }

    fn nudge_tempo(&mut self, delta: f64) -> EyreResult<()> {
        let mut engine = self.lock()?;
        let bpm = engine.tempo() + delta;
        engine.set_tempo(bpm);
        Ok(())
    }

    fn nudge_volume(&mut self, delta: f32) -> EyreResult<()> {
        let track = self.cursor.lane().track();
        let mut engine = self.lock()?;
        let db = engine.volume(track) + delta;
        engine.set_volume(track, db);
        Ok(())
    }

    fn toggle_key(&mut self, note: u8) -> EyreResult<()> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| eyre!("audio thread panicked while holding the engine"))?;
        if self.latched.remove(&note) {
            engine.key_up(note);
        } else {
            self.latched.insert(note);
            engine.key_down(note);
        }
        Ok(())
    }

    fn toggle_motion(&mut self) {
        if self.motion.is_enabled() {
            self.motion.disable();
            self.status = "motion off".to_string();
            return;
        }
        self.status = match self.motion.enable(SyntheticCamera::new()) {
            Ok(()) => "motion on (synthetic camera)".to_string(),
            Err(err) => format!("motion unavailable: {err}"),
        };
    }

    fn render(&mut self, frame: &mut Frame, state: &UiState) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Length(7), // Step grid
                Constraint::Length(1), // Modulation status
                Constraint::Min(6),    // Scope
                Constraint::Length(1), // Status
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let motion = self.motion.is_enabled().then(|| self.motion.intensity());
        render_transport(frame, chunks[0], state, motion);
        render_grid(frame, chunks[1], state, self.cursor);
        frame.render_widget(modulation_line(state, &self.latched), chunks[2]);

        match self.analyser.snapshot() {
            Scope::Waveform(samples) => render_waveform(frame, chunks[3], samples),
            Scope::Spectrum(points) => render_spectrum(frame, chunks[3], points),
        }

        frame.render_widget(
            Paragraph::new(format!(" {}", self.status)).style(Style::default().fg(Color::Gray)),
            chunks[4],
        );

        let help = Paragraph::new(
            " [Space] Play/Stop  [←→↑↓] Move  [Enter] Edit  [+/-] Tempo  [g/b] Generate  \
             [c/d/x] Clear  [w/e] Wobble  [a/m/i] Arp  [1-8/0] Keys  [[/]] Volume  \
             [o] Scope  [t] Motion  [q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[5]);
    }
}

fn modulation_line(state: &UiState, latched: &BTreeSet<u8>) -> Paragraph<'static> {
    let arp = if state.arp.enabled {
        format!(
            "arp {} {} ({:?})",
            state.arp.mode.name(),
            state.arp.interval,
            state.arp.state
        )
    } else {
        "arp off".to_string()
    };
    let keys: Vec<String> = latched.iter().map(|&n| notes::note_name(n)).collect();

    Paragraph::new(Line::from(vec![
        Span::styled(
            format!(
                " wobble {} depth {:.2} cutoff {:>4.0}Hz  ",
                state.wobble_rate.name(),
                state.wobble_depth,
                state.wobble_cutoff
            ),
            Style::default().fg(Color::LightMagenta),
        ),
        Span::styled(format!("{arp}  "), Style::default().fg(Color::LightCyan)),
        Span::styled(
            format!("keys [{}]", keys.join(" ")),
            Style::default().fg(Color::White),
        ),
    ]))
}

// Purpose: The engine context object. Owns every voice, the transport and
// the pattern; the application root constructs one and passes it around.

pub mod analyser;
pub mod bus;
pub mod config;
pub mod context;
pub mod error;
pub mod scheduler;
pub mod transport;
pub mod wobble;

pub use analyser::{Analyser, Scope, ScopeMode};
pub use config::EngineConfig;
pub use context::{AudioContext, ContextState, OfflineContext};
pub use error::EngineError;
pub use scheduler::{ScheduledEvent, Scheduler, SchedulerEvent};
pub use transport::{step_duration_secs, StepGrid, Transport, MAX_BPM, MIN_BPM};
pub use wobble::{Wobble, WobbleRate};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::{
    engine::{analyser::AnalyserTap, bus::MasterBus},
    graph::param::SharedParam,
    sequencing::{
        generator, ArpMode, ArpState, Arpeggiator, BassNote, BeatStyle, Duration, Pattern, Step,
    },
    voices::{DrumTrack, Track, VoiceSet},
};

/*
Engine
======

    UI / control thread                     audio callback
    ───────────────────                     ──────────────
    start / stop / set_tempo                render(out)
    toggle_step, generate_*                   ├─ wobble → bass cutoff
    set_volume, set_wobble                    ├─ scheduler → voice triggers
    key_down / key_up                         ├─ arpeggiator → lead triggers
                                              ├─ voices → strips → master bus
                                              └─ bus → out, analyser tap

Time is the audio clock: frames rendered since construction. Every trigger
is stamped with the frame it must sound on, and voices split their render
blocks so it lands on that exact sample.

`render` works in control blocks of at most 128 frames. The wobble and the
scheduler look at the world once per control block, which keeps the bass
sweep smooth and bounds how early the step indicator moves.

Control calls take effect at the next control block. While playing, any
change that affects the remaining bar (pattern edit, tempo change) cancels
the pending steps and schedules them again from the next step that has not
fired. Stopping cancels the schedule outright; nothing scheduled before a
stop can sound after it.
*/

/// Frames per internal render pass.
pub const CONTROL_BLOCK_SIZE: usize = 128;

/// Lead filter cutoff until something moves it.
pub const LEAD_IDLE_CUTOFF_HZ: f32 = 1_700.0;

/// What the engine did, stamped with the audio frame it happens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Step { index: usize, at: u64 },
    Trigger { track: Track, note: Option<u8>, at: u64 },
}

type Listener = Box<dyn FnMut(EngineEvent) + Send>;

pub struct Engine {
    sample_rate: f32,
    voices: VoiceSet,
    bus: MasterBus,
    transport: Transport,
    scheduler: Scheduler,
    pattern: Pattern,
    wobble: Wobble,
    arp: Arpeggiator,
    lead_cutoff: SharedParam,
    rng: StdRng,
    frames: u64,
    tap: AnalyserTap,
    analyser: Option<Analyser>,
    listener: Option<Listener>,
}

impl Engine {
    /// Build and wire every voice. Nothing is returned unless the whole
    /// graph came up.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let sample_rate = config.sample_rate;
        let bpm = config.initial_bpm();

        let wobble_cutoff = SharedParam::new(config.wobble_low_hz);
        let wobble = Wobble::new(config.wobble_low_hz, config.wobble_high_hz, wobble_cutoff.clone());
        let lead_cutoff = SharedParam::new(LEAD_IDLE_CUTOFF_HZ);

        let voices = VoiceSet::new(sample_rate, wobble_cutoff, lead_cutoff.clone());
        let (tap, analyser) = analyser::analyser(config.analyser_size, sample_rate);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(sample_rate, bpm, seed = ?config.seed, "engine ready");

        Ok(Self {
            sample_rate,
            voices,
            bus: MasterBus::new(),
            transport: Transport::new(bpm, sample_rate as f64),
            scheduler: Scheduler::new(),
            pattern: Pattern::new(),
            wobble,
            arp: Arpeggiator::new(),
            lead_cutoff,
            rng,
            frames: 0,
            tap,
            analyser: Some(analyser),
            listener: None,
        })
    }

    /// Fill `out` with the next `out.len()` mono frames.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(CONTROL_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let len = out.len();
        let block_start = self.frames;
        let block_end = block_start + len as u64;

        self.wobble.advance(self.transport.bpm(), self.sample_rate, len);
        self.dispatch_steps(block_end);
        self.tick_arpeggiator(block_start, len);

        self.bus.begin(len);
        self.voices.render_into(&mut self.bus, block_start);
        self.bus.finish(out);
        self.tap.push(out);

        self.frames = block_end;
    }

    fn dispatch_steps(&mut self, block_end: u64) {
        while let Some(event) = self.scheduler.pop_due(block_end) {
            match event.event {
                SchedulerEvent::Step { index, step } => {
                    self.transport.enter_step(index);
                    self.emit(EngineEvent::Step { index, at: event.at });
                    self.trigger_step(step, event.at);
                }
                SchedulerEvent::BarEnd => {
                    let grid = self.transport.grid().next_bar();
                    self.transport.set_grid(grid);
                    self.scheduler.schedule_from(&self.pattern, &grid, 0);
                }
            }
        }
    }

    fn trigger_step(&mut self, step: Step, at: u64) {
        for drum in DrumTrack::ALL {
            if step.drum(drum) {
                self.trigger(drum.into(), None, at);
            }
        }
        if let Some(note) = step.bass {
            self.trigger(Track::Bass, Some(note.midi()), at);
        }
    }

    fn trigger(&mut self, track: Track, note: Option<u8>, at: u64) {
        let hold = self.hold_frames(track.hold());
        self.voices.voice_mut(track).trigger(note, hold, at);
        self.emit(EngineEvent::Trigger { track, note, at });
    }

    fn tick_arpeggiator(&mut self, block_start: u64, len: usize) {
        let voices = &mut self.voices;
        let listener = &mut self.listener;
        self.arp.render(
            block_start,
            len,
            self.transport.bpm(),
            self.sample_rate as f64,
            &mut self.rng,
            |tick| {
                voices
                    .voice_mut(Track::Lead)
                    .trigger(Some(tick.note), tick.hold_frames, tick.at);
                if let Some(listener) = listener.as_mut() {
                    listener(EngineEvent::Trigger {
                        track: Track::Lead,
                        note: Some(tick.note),
                        at: tick.at,
                    });
                }
            },
        );
    }

    fn hold_frames(&self, duration: Duration) -> u64 {
        duration
            .to_frames(self.transport.bpm(), self.sample_rate as f64)
            .round() as u64
    }

    fn emit(&mut self, event: EngineEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }

    /// Called from the render path for every step and trigger.
    pub fn set_listener(&mut self, listener: impl FnMut(EngineEvent) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    // ----------------------------------------------------------------------
    // Transport

    /// Start the loop from step 0 on the next rendered frame, resuming
    /// `ctx` first if it is suspended. Restarts when already playing.
    pub fn start<C: AudioContext + ?Sized>(&mut self, ctx: &mut C) -> Result<(), EngineError> {
        if ctx.state() != ContextState::Running {
            if let Err(err) = ctx.resume() {
                warn!(%err, "start refused");
                return Err(err);
            }
            if ctx.state() != ContextState::Running {
                let err = EngineError::PlaybackBlocked("audio context did not resume".into());
                warn!(%err, "start refused");
                return Err(err);
            }
        }

        if ctx.sample_rate() != self.sample_rate {
            return Err(EngineError::InvalidConfig(format!(
                "context runs at {} Hz, engine was built for {} Hz",
                ctx.sample_rate(),
                self.sample_rate
            )));
        }

        self.scheduler.cancel_all();
        self.transport.start(self.frames);
        let grid = self.transport.grid();
        self.scheduler.schedule_from(&self.pattern, &grid, 0);

        debug!(frame = self.frames, bpm = self.transport.bpm(), "transport started");
        Ok(())
    }

    /// Halt the loop. Pending steps are dropped, drum and bass triggers that
    /// have not fired are cancelled and the bass is released. Safe to call
    /// when already stopped.
    pub fn stop(&mut self) {
        if !self.transport.is_playing() && self.scheduler.is_empty() {
            return;
        }

        self.scheduler.cancel_all();
        self.transport.stop();
        for track in [Track::Kick, Track::Snare, Track::HiHat, Track::Bass] {
            let voice = self.voices.voice_mut(track);
            voice.cancel_pending();
            voice.release_all(self.frames);
        }

        debug!(frame = self.frames, "transport stopped");
    }

    /// Clamp to 60..200 bpm. While playing the next pending step keeps its
    /// frame; only the steps after it move.
    pub fn set_tempo(&mut self, bpm: f64) -> f64 {
        let bpm = self.transport.set_bpm(bpm);
        if self.transport.is_playing() {
            if let Some(next) = self.scheduler.next_pending_index() {
                let grid = self
                    .transport
                    .grid()
                    .reanchored(next, self.transport.step_frames());
                self.transport.set_grid(grid);
                self.scheduler.schedule_from(&self.pattern, &grid, next);
            }
        }
        debug!(bpm, "tempo");
        bpm
    }

    pub fn tempo(&self) -> f64 {
        self.transport.bpm()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Step under the playhead, `None` while stopped.
    pub fn current_step(&self) -> Option<usize> {
        self.transport.current_step()
    }

    // ----------------------------------------------------------------------
    // Pattern

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn toggle_step(&mut self, index: usize, track: DrumTrack) {
        self.pattern.toggle_step(index, track);
        self.pattern_changed();
    }

    pub fn set_bass_note(&mut self, index: usize, note: Option<BassNote>) {
        self.pattern.set_bass_note(index, note);
        self.pattern_changed();
    }

    pub fn cycle_bass_note(&mut self, index: usize) {
        self.pattern.cycle_bass_note(index);
        self.pattern_changed();
    }

    pub fn generate_beat(&mut self, style: BeatStyle) {
        generator::generate_beat(&mut self.pattern, style, &mut self.rng);
        debug!(style = style.name(), "generated beat");
        self.pattern_changed();
    }

    pub fn generate_bassline(&mut self) {
        generator::generate_bassline(&mut self.pattern, &mut self.rng);
        debug!("generated bassline");
        self.pattern_changed();
    }

    pub fn clear_all(&mut self) {
        self.pattern.clear_all();
        self.pattern_changed();
    }

    pub fn clear_drums(&mut self) {
        self.pattern.clear_drums();
        self.pattern_changed();
    }

    pub fn clear_bass(&mut self) {
        self.pattern.clear_bass();
        self.pattern_changed();
    }

    fn pattern_changed(&mut self) {
        if !self.transport.is_playing() {
            return;
        }
        if let Some(next) = self.scheduler.next_pending_index() {
            let grid = self.transport.grid();
            self.scheduler.schedule_from(&self.pattern, &grid, next);
        }
    }

    // ----------------------------------------------------------------------
    // Mixer and modulation

    /// Clamped to -30..0 dB.
    pub fn set_volume(&mut self, track: Track, db: f32) {
        self.voices.set_volume(track, db, self.sample_rate);
    }

    pub fn volume(&self, track: Track) -> f32 {
        self.voices.volume(track)
    }

    /// Depth is clamped to 0..1. The LFO phase carries on.
    pub fn set_wobble(&mut self, rate: WobbleRate, depth: f32) {
        self.wobble.set_rate(rate);
        self.wobble.set_depth(depth);
    }

    pub fn wobble(&self) -> (WobbleRate, f32) {
        (self.wobble.rate(), self.wobble.depth())
    }

    /// Bass filter cutoff most recently written by the wobble.
    pub fn wobble_cutoff(&self) -> f32 {
        self.wobble.cutoff_param().get()
    }

    /// Live handle on the lead filter cutoff, for the motion pipeline.
    pub fn lead_cutoff_param(&self) -> SharedParam {
        self.lead_cutoff.clone()
    }

    // ----------------------------------------------------------------------
    // Lead and arpeggiator

    /// Hand the held keys to the arpeggiator, or back to the lead.
    pub fn enable_arpeggiator(&mut self, enabled: bool) {
        if enabled == self.arp.is_enabled() {
            return;
        }
        self.arp.enable(enabled);
        self.voices.voice_mut(Track::Lead).release_all(self.frames);
        if !enabled {
            let held: Vec<u8> = self.arp.held().collect();
            for note in held {
                self.voices
                    .voice_mut(Track::Lead)
                    .trigger_attack(Some(note), self.frames);
            }
        }
        debug!(enabled, "arpeggiator");
    }

    pub fn set_arp_mode(&mut self, mode: ArpMode) {
        self.arp.set_mode(mode);
    }

    pub fn set_arp_interval(&mut self, interval: Duration) {
        self.arp.set_interval(interval);
    }

    pub fn arpeggiator(&self) -> &Arpeggiator {
        &self.arp
    }

    pub fn arp_state(&self) -> ArpState {
        self.arp.state()
    }

    /// A key went down. Held for the arpeggiator when it is on, played on
    /// the lead straight away otherwise.
    pub fn key_down(&mut self, note: u8) {
        self.arp.note_on(note);
        if !self.arp.is_enabled() {
            self.voices
                .voice_mut(Track::Lead)
                .trigger_attack(Some(note), self.frames);
            self.emit(EngineEvent::Trigger {
                track: Track::Lead,
                note: Some(note),
                at: self.frames,
            });
        }
    }

    pub fn key_up(&mut self, note: u8) {
        self.arp.note_off(note);
        if !self.arp.is_enabled() {
            self.voices
                .voice_mut(Track::Lead)
                .trigger_release(Some(note), self.frames);
        }
    }

    /// Let go of every held key.
    pub fn release_keys(&mut self) {
        self.arp.release_all();
        self.voices.voice_mut(Track::Lead).release_all(self.frames);
    }

    // ----------------------------------------------------------------------
    // Output

    /// The view side of the analyser. Handed out once.
    pub fn take_analyser(&mut self) -> Option<Analyser> {
        self.analyser.take()
    }

    /// Peak of the last control block on the master bus.
    pub fn peak(&self) -> f32 {
        self.bus.peak()
    }

    pub fn rms(&self) -> f32 {
        self.bus.rms()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn is_sounding(&self, track: Track) -> bool {
        self.voices.voice(track).is_sounding()
    }

    /// Stop everything and silence every voice.
    pub fn shutdown(&mut self) {
        self.stop();
        self.arp.enable(false);
        self.arp.release_all();
        self.voices.silence(self.frames);
        info!(frames = self.frames, "engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const SR: f32 = 48_000.0;

    fn engine() -> Engine {
        Engine::new(EngineConfig::new().sample_rate(SR).seed(1)).expect("engine")
    }

    fn recorded(engine: &mut Engine) -> Arc<Mutex<Vec<EngineEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        engine.set_listener(move |event| sink.lock().unwrap().push(event));
        events
    }

    fn render_frames(engine: &mut Engine, frames: usize) {
        let mut buf = vec![0.0; 512];
        let mut left = frames;
        while left > 0 {
            let n = left.min(buf.len());
            engine.render(&mut buf[..n]);
            left -= n;
        }
    }

    fn steps(events: &[EngineEvent]) -> Vec<(usize, u64)> {
        events
            .iter()
            .filter_map(|e| match *e {
                EngineEvent::Step { index, at } => Some((index, at)),
                EngineEvent::Trigger { .. } => None,
            })
            .collect()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Engine::new(EngineConfig::new().sample_rate(0.0));
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn steps_land_on_the_tempo_grid() {
        let mut engine = engine();
        let events = recorded(&mut engine);
        engine.start(&mut OfflineContext::new(SR)).unwrap();
        render_frames(&mut engine, 96_000 + 1);

        let fired = steps(&events.lock().unwrap());
        let expected: Vec<(usize, u64)> = (0..16).map(|i| (i, i as u64 * 6_000)).chain([(0, 96_000)]).collect();
        assert_eq!(fired, expected);
    }

    #[test]
    fn tempo_change_only_moves_later_steps() {
        let mut engine = engine();
        let events = recorded(&mut engine);
        engine.start(&mut OfflineContext::new(SR)).unwrap();
        render_frames(&mut engine, 7_000);
        engine.set_tempo(60.0);
        render_frames(&mut engine, 30_000);

        let fired = steps(&events.lock().unwrap());
        assert_eq!(&fired[..4], &[(0, 0), (1, 6_000), (2, 12_000), (3, 24_000)]);
    }

    #[test]
    fn edit_while_playing_reschedules_pending_steps() {
        let mut engine = engine();
        let events = recorded(&mut engine);
        engine.start(&mut OfflineContext::new(SR)).unwrap();
        render_frames(&mut engine, 10_000);
        engine.toggle_step(8, DrumTrack::Kick);
        // Step 1 already fired; this edit must not replay it
        engine.toggle_step(1, DrumTrack::Snare);
        render_frames(&mut engine, 86_000);

        let events = events.lock().unwrap();
        let kicks: Vec<u64> = events
            .iter()
            .filter_map(|e| match *e {
                EngineEvent::Trigger { track: Track::Kick, at, .. } => Some(at),
                _ => None,
            })
            .collect();
        assert_eq!(kicks, vec![48_000]);
        assert!(!events
            .iter()
            .any(|e| matches!(e, EngineEvent::Trigger { track: Track::Snare, .. })));
        let indices: Vec<usize> = steps(&events).iter().map(|s| s.0).collect();
        assert_eq!(indices, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn blocked_context_keeps_transport_stopped() {
        let mut engine = engine();
        let mut ctx = OfflineContext::suspended(SR, false);
        let result = engine.start(&mut ctx);
        assert!(matches!(result, Err(EngineError::PlaybackBlocked(_))));
        assert!(!engine.is_playing());
        assert_eq!(engine.current_step(), None);

        ctx.allow_resume(true);
        engine.start(&mut ctx).unwrap();
        assert!(engine.is_playing());
    }

    #[test]
    fn arpeggiator_drives_the_lead() {
        let mut engine = engine();
        let events = recorded(&mut engine);
        engine.enable_arpeggiator(true);
        engine.key_down(64);
        engine.key_down(60);
        render_frames(&mut engine, 12_001);

        let notes: Vec<(Option<u8>, u64)> = events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match *e {
                EngineEvent::Trigger { track: Track::Lead, note, at } => Some((note, at)),
                _ => None,
            })
            .collect();
        assert_eq!(notes, vec![(Some(60), 0), (Some(64), 6_000), (Some(60), 12_000)]);
        assert_eq!(engine.arp_state(), ArpState::Running);
    }

    #[test]
    fn wobble_keeps_running_while_stopped() {
        let mut engine = engine();
        engine.set_wobble(WobbleRate::Quarter, 1.0);
        let first = engine.wobble_cutoff();
        render_frames(&mut engine, 6_000);
        assert_ne!(engine.wobble_cutoff(), first);
        assert!(!engine.is_playing());
    }

    #[test]
    fn output_is_limited() {
        let mut engine = engine();
        for track in Track::ALL {
            engine.set_volume(track, 0.0);
        }
        engine.generate_beat(BeatStyle::Trap);
        engine.generate_bassline();
        for note in [60, 64, 67, 72] {
            engine.key_down(note);
        }
        engine.start(&mut OfflineContext::new(SR)).unwrap();

        let mut out = vec![0.0; 2_048];
        for _ in 0..40 {
            engine.render(&mut out);
            assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn analyser_is_handed_out_once() {
        let mut engine = engine();
        assert!(engine.take_analyser().is_some());
        assert!(engine.take_analyser().is_none());
    }

    #[test]
    fn shutdown_silences_everything() {
        let mut engine = engine();
        engine.toggle_step(0, DrumTrack::Kick);
        engine.key_down(60);
        engine.start(&mut OfflineContext::new(SR)).unwrap();
        render_frames(&mut engine, 1_024);
        engine.shutdown();
        render_frames(&mut engine, 48_000);

        let mut out = vec![1.0; 512];
        engine.render(&mut out);
        assert!(out.iter().all(|&s| s.abs() < 1e-6));
        assert!(!engine.is_playing());
    }
}

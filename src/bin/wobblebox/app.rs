//! Audio device setup and the cpal-backed audio context

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use wobblebox::{
    engine::{AudioContext, ContextState},
    motion::MotionPipeline,
    Engine, EngineConfig, EngineError, MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Output stream as an [`AudioContext`].
///
/// The stream is built paused. The first `Engine::start` resumes it, the same
/// way a browser audio context waits for a user gesture.
pub struct CpalContext {
    stream: cpal::Stream,
    state: ContextState,
    sample_rate: f32,
}

impl CpalContext {
    fn new(stream: cpal::Stream, sample_rate: f32) -> Self {
        Self {
            stream,
            state: ContextState::Suspended,
            sample_rate,
        }
    }
}

impl AudioContext for CpalContext {
    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        self.stream
            .play()
            .map_err(|err| EngineError::PlaybackBlocked(err.to_string()))?;
        self.state = ContextState::Running;
        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

/// Open the default output, build the engine and hand both to the UI.
pub fn run() -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    tracing::info!(sample_rate, channels, "output device ready");

    let mut engine = Engine::new(EngineConfig::new().sample_rate(sample_rate))
        .wrap_err("failed to build the audio engine")?;
    let analyser = engine
        .take_analyser()
        .ok_or_else(|| eyre!("analyser already taken"))?;
    let motion = MotionPipeline::new(engine.lead_cutoff_param());

    let engine = Arc::new(Mutex::new(engine));
    let audio_engine = engine.clone();
    let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let Ok(mut engine) = audio_engine.lock() else {
                    data.fill(0.0);
                    return;
                };

                for chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                    let frames = chunk.len() / channels;
                    let block = &mut mono[..frames];
                    engine.render(block);

                    // Mono to every channel
                    for (frame, &sample) in chunk.chunks_mut(channels).zip(block.iter()) {
                        frame.fill(sample);
                    }
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )
        .wrap_err("failed to build output stream")?;
    // Some backends start streams on creation
    let _ = stream.pause();

    let ctx = CpalContext::new(stream, sample_rate);

    let mut terminal = ratatui::init();
    let result = UiApp::new(engine, analyser, ctx, motion).run(&mut terminal);
    ratatui::restore();
    result
}

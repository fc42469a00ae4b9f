use crate::engine::error::EngineError;

/*
Audio Context
=============

The engine renders samples; something else owns the output device. Before
the transport may start, that device has to be running. Some hosts start
suspended and only resume after a user gesture, and a resume can be
refused. `Engine::start` checks the context first and stays stopped when it
cannot be brought up.

    Suspended --resume()--> Running
        |                      |
        +------ refused -------+--> start() returns PlaybackBlocked
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
    Closed,
}

/// Host side of the audio output.
pub trait AudioContext {
    fn state(&self) -> ContextState;

    /// Bring a suspended context up. Fails with
    /// [`EngineError::PlaybackBlocked`] when the host refuses.
    fn resume(&mut self) -> Result<(), EngineError>;

    fn sample_rate(&self) -> f32;
}

/// Context without a device: offline rendering, tests, benches.
#[derive(Debug, Clone)]
pub struct OfflineContext {
    state: ContextState,
    sample_rate: f32,
    allow_resume: bool,
}

impl OfflineContext {
    /// Already running.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: ContextState::Running,
            sample_rate,
            allow_resume: true,
        }
    }

    /// Starts suspended. `allow_resume` decides whether `resume` succeeds.
    pub fn suspended(sample_rate: f32, allow_resume: bool) -> Self {
        Self {
            state: ContextState::Suspended,
            sample_rate,
            allow_resume,
        }
    }

    pub fn allow_resume(&mut self, allow: bool) {
        self.allow_resume = allow;
    }

    pub fn close(&mut self) {
        self.state = ContextState::Closed;
    }
}

impl AudioContext for OfflineContext {
    fn state(&self) -> ContextState {
        self.state
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        match self.state {
            ContextState::Running => Ok(()),
            ContextState::Closed => Err(EngineError::PlaybackBlocked("context is closed".into())),
            ContextState::Suspended if self.allow_resume => {
                self.state = ContextState::Running;
                Ok(())
            }
            ContextState::Suspended => Err(EngineError::PlaybackBlocked(
                "resume refused while suspended".into(),
            )),
        }
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The audio context refused to resume. Retry on the next user action.
    #[error("playback blocked: {0}")]
    PlaybackBlocked(String),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

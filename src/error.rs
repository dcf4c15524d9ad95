use thiserror::Error;

pub type Result<T, E = ClockError> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("time control must be longer than zero seconds")]
    NonPositiveDuration,
    #[error("unknown preset: {0:?}")]
    UnknownPreset(String),
    #[error("tick rate must be between 10 and 1000 ms, got {0}")]
    InvalidTickRate(u64),
}

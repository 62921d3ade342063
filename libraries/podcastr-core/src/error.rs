/// Core error types for Podcastr
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Podcastr
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record is missing a field the player cannot do without
    #[error("Invalid episode: {0}")]
    InvalidEpisode(String),

    /// Duration is negative, non-finite or not a number
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Publication timestamp could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create an invalid episode error
    pub fn invalid_episode(msg: impl Into<String>) -> Self {
        Self::InvalidEpisode(msg.into())
    }

    /// Create an invalid duration error
    pub fn invalid_duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    /// Create an invalid date error
    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }
}

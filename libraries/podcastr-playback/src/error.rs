//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Session commands never fail; these come from the audio capability.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio capability failed to carry out a command
    #[error("Audio element error: {0}")]
    Audio(String),

    /// Audio capability refused to start playback (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    PlayRejected(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

//! Player events
//!
//! Discrete change notifications queued by the session. Surfaces that need
//! to react to a specific change (rather than re-render from the snapshot)
//! drain these after issuing a command or delivering an audio event.

use serde::{Deserialize, Serialize};

/// Events emitted by the player session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Current episode changed (including to nothing)
    EpisodeChanged {
        /// ID of the new current episode
        episode_id: Option<String>,
        /// ID of the episode that was current before
        previous_episode_id: Option<String>,
        /// New current index
        index: Option<usize>,
    },

    /// Play intent changed
    PlayingChanged {
        /// New play intent
        is_playing: bool,
    },

    /// Loop or shuffle flag changed
    ModesChanged {
        /// Looping flag
        is_looping: bool,
        /// Shuffling flag
        is_shuffling: bool,
    },

    /// Queue replaced or cleared
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Elapsed seconds changed (time update or seek)
    ProgressUpdated {
        /// Elapsed whole seconds
        elapsed: u64,
    },

    /// Looping restarted the current episode
    EpisodeReplayed {
        /// ID of the replayed episode
        episode_id: String,
    },

    /// Last episode ended with nothing to advance to
    QueueExhausted,

    /// Audio element reported a failure
    AudioError {
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = PlayerEvent::PlayingChanged { is_playing: true };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"PlayingChanged":{"is_playing":true}}"#);

        let json = serde_json::to_string(&PlayerEvent::QueueExhausted).unwrap();
        assert_eq!(json, r#""QueueExhausted""#);
    }
}

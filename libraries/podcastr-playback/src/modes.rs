//! Loop and shuffle flags
//!
//! The flags change what navigation means; they never touch the queue.

use serde::{Deserialize, Serialize};

/// Playback mode flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackModes {
    /// Replay the current episode when it ends
    pub looping: bool,

    /// Pick a random index for next/previous
    pub shuffling: bool,
}

impl PlaybackModes {
    /// Flip looping, returning the new value
    pub fn toggle_loop(&mut self) -> bool {
        self.looping = !self.looping;
        self.looping
    }

    /// Flip shuffling, returning the new value
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffling = !self.shuffling;
        self.shuffling
    }

    /// Both flags off
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether shuffling can reach another episode
///
/// Surfaces use this to disable the shuffle control on single-item queues.
pub fn shuffle_available(queue_len: usize) -> bool {
    queue_len > 1
}

//! Core types for playback session management

use podcastr_core::{Episode, EpisodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one load issued to the audio element
///
/// Every time the session loads a source it issues a fresh ticket. Audio
/// callbacks carry the ticket of the load they belong to, so late events for
/// a superseded episode can be told apart from current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadTicket(u32);

impl LoadTicket {
    /// Ticket that matches no load
    pub const NONE: LoadTicket = LoadTicket(0);

    /// Wrap a raw ticket value (as handed back by a host)
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw ticket value
    pub fn as_raw(self) -> u32 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        match self.0.wrapping_add(1) {
            0 => LoadTicket(1),
            raw => LoadTicket(raw),
        }
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the audio element is asked to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Ticket the element must stamp on events for this source
    pub ticket: LoadTicket,

    /// Episode being loaded
    pub episode_id: EpisodeId,

    /// Media locator
    pub url: String,

    /// Expected length in whole seconds
    pub duration: u64,
}

impl MediaSource {
    pub(crate) fn for_episode(episode: &Episode, ticket: LoadTicket) -> Self {
        Self {
            ticket,
            episode_id: episode.id.clone(),
            url: episode.url.clone(),
            duration: episode.duration,
        }
    }
}

/// Configuration for a player session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for shuffle draws (default: seeded from entropy)
    ///
    /// Fixing the seed makes shuffled navigation reproducible.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

/// Everything a UI surface may render, captured after a transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Episode at the current index
    pub current_episode: Option<Episode>,

    /// Current index into the queue
    pub current_index: Option<usize>,

    /// Number of queued episodes
    pub queue_len: usize,

    /// Play intent
    pub is_playing: bool,

    /// Replay the current episode when it ends
    pub is_looping: bool,

    /// Random navigation
    pub is_shuffling: bool,

    /// Whether `play_next` would move
    pub has_next: bool,

    /// Whether `play_previous` would move
    pub has_previous: bool,

    /// Whether shuffling can mean anything for this queue
    pub shuffle_available: bool,

    /// Elapsed whole seconds, as reported by the audio element
    pub elapsed: u64,
}

impl SessionSnapshot {
    /// Elapsed seconds clamped to the current episode's duration
    pub fn display_elapsed(&self) -> u64 {
        match &self.current_episode {
            Some(episode) => self.elapsed.min(episode.duration),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.shuffle_seed, None);
    }

    #[test]
    fn tickets_skip_the_none_value_on_wrap() {
        assert_eq!(LoadTicket::NONE.next(), LoadTicket::from_raw(1));
        assert_eq!(LoadTicket::from_raw(u32::MAX).next(), LoadTicket::from_raw(1));
        assert_ne!(LoadTicket::NONE.next(), LoadTicket::NONE);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let snapshot = SessionSnapshot {
            current_episode: None,
            current_index: None,
            queue_len: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            has_next: false,
            has_previous: false,
            shuffle_available: false,
            elapsed: 0,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["queueLen"], 0);
        assert!(json["currentEpisode"].is_null());
    }
}

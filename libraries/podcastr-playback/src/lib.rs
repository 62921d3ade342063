//! Podcastr - Playback Session Management
//!
//! Platform-agnostic playback session for Podcastr.
//!
//! This crate provides:
//! - Episode queue with a clamped current index
//! - Loop and shuffle flags
//! - Queue navigation (sequential and history-less random)
//! - Session controller shared by every UI surface
//! - Progress reporting (elapsed seconds, optimistic seek)
//! - Stale audio callback filtering
//!
//! # Architecture
//!
//! `podcastr-playback` never renders audio:
//! - No dependency on any audio backend
//! - No dependency on any UI framework
//! - Works natively and in the browser (feature `wasm`)
//!
//! The host provides an [`AudioElement`] and reports back what it does as
//! [`AudioEvent`]s stamped with the [`LoadTicket`] of the load they belong to.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use podcastr_core::Episode;
//! use podcastr_playback::{PlayerSession, SessionConfig};
//!
//! let mut session = PlayerSession::new(SessionConfig::default());
//!
//! let episodes = vec![
//!     Episode::new("a", "First", "Host", "https://cdn/a.mp3", 100),
//!     Episode::new("b", "Second", "Host", "https://cdn/b.mp3", 200),
//! ];
//! session.play_list(episodes, 0);
//!
//! assert!(session.is_playing());
//! assert!(session.has_next());
//! assert!(!session.has_previous());
//!
//! assert!(session.play_next());
//! assert_eq!(session.current_episode().unwrap().id.as_str(), "b");
//! assert!(!session.play_next());
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust
//! use podcastr_playback::{AudioElement, AudioEvent, MediaSource, PlayerSession, Result};
//!
//! struct MyAudio;
//!
//! impl AudioElement for MyAudio {
//!     fn load(&mut self, _source: &MediaSource) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn seek(&mut self, _position_secs: u64) -> Result<()> { Ok(()) }
//! }
//!
//! let mut session = PlayerSession::default();
//! session.set_audio_element(Box::new(MyAudio));
//!
//! // Later, from the platform's event loop:
//! let ticket = session.current_ticket();
//! session.handle_audio_event(ticket, AudioEvent::TimeUpdate { position: 1.5 });
//! ```

mod audio;
mod error;
mod events;
mod modes;
pub mod navigation;
mod progress;
mod queue;
mod session;
mod subscription;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use audio::{AudioElement, AudioEvent};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use modes::{shuffle_available, PlaybackModes};
pub use navigation::{Cursor, TrackEndAction};
pub use progress::ProgressReporter;
pub use queue::EpisodeQueue;
pub use session::PlayerSession;
pub use subscription::SubscriptionId;
pub use types::{LoadTicket, MediaSource, SessionConfig, SessionSnapshot};

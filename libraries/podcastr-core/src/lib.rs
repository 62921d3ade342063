//! Podcastr Core
//!
//! Platform-agnostic episode types, record normalization and display
//! formatting shared by every Podcastr surface.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Episode`, `EpisodeId`, and the raw REST record shape
//! - **Catalog**: newest-first ordering and the latest/all split used by the home list
//! - **Formatting**: `MM:SS` durations and `d MMM yy` publication labels
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use podcastr_core::{convert_duration_to_time_string, Episode};
//!
//! let episode = Episode::new("ep-1", "Pilot", "Diego and Richard", "https://cdn/ep-1.mp3", 65);
//! assert_eq!(episode.duration_as_string(), "01:05");
//! assert_eq!(convert_duration_to_time_string(3600), "60:00");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod format;
pub mod types;

pub use catalog::EpisodeCatalog;
pub use error::{CoreError, Result};
pub use format::{convert_duration_to_time_string, format_published_at};
pub use types::{parse_episodes, Episode, EpisodeId, RawDuration, RawEpisode, RawEpisodeFile};

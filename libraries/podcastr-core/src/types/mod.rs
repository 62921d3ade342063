//! Core domain types for Podcastr

mod episode;
mod ids;
mod raw;

pub use episode::Episode;
pub use ids::EpisodeId;
pub use raw::{parse_episodes, RawDuration, RawEpisode, RawEpisodeFile};

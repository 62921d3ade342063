//! WASM-compatible type definitions

use podcastr_core::Episode;
use serde::{Deserialize, Serialize};

/// Episode as passed from JavaScript
///
/// Field names follow the camelCase shape the front end already uses for
/// normalized episodes; extra fields (`publishedAt`, `durationAsString`) are
/// ignored.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmEpisode {
    id: String,
    title: String,
    #[serde(default)]
    members: String,
    url: String,
    duration: f64,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<WasmEpisode> for Episode {
    fn from(episode: WasmEpisode) -> Self {
        let duration = if episode.duration.is_finite() && episode.duration > 0.0 {
            episode.duration.floor() as u64
        } else {
            0
        };

        let mut converted = Episode::new(
            episode.id,
            episode.title,
            episode.members,
            episode.url,
            duration,
        );
        converted.thumbnail = episode.thumbnail;
        converted.description = episode.description;
        converted
    }
}

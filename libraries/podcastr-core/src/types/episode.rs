/// Episode domain type
use crate::format::{convert_duration_to_time_string, format_published_at};
use crate::types::EpisodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playable podcast episode
///
/// Owned by whichever fetch produced it and never mutated afterwards; the
/// player takes snapshots of episode lists rather than borrowing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique episode identifier
    pub id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Hosts and guests, as a display string
    pub members: String,

    /// Locator of the playable media
    pub url: String,

    /// Total length in whole seconds
    pub duration: u64,

    /// Cover image locator
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// HTML description
    #[serde(default)]
    pub description: Option<String>,

    /// Publication timestamp
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Episode {
    /// Create an episode with the fields the player needs
    pub fn new(
        id: impl Into<EpisodeId>,
        title: impl Into<String>,
        members: impl Into<String>,
        url: impl Into<String>,
        duration: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            members: members.into(),
            url: url.into(),
            duration,
            thumbnail: None,
            description: None,
            published_at: None,
        }
    }

    /// Attach a cover image
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a publication timestamp
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Duration as `MM:SS`
    pub fn duration_as_string(&self) -> String {
        convert_duration_to_time_string(self.duration)
    }

    /// Publication date as `d MMM yy`, if known
    pub fn published_label(&self) -> Option<String> {
        self.published_at.as_ref().map(format_published_at)
    }
}

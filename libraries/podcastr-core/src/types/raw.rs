//! Episode records as served by the REST backend
//!
//! The backend nests the media under `file` and is loose about number types,
//! so records are deserialized into these shapes first and then normalized
//! into [`Episode`].

use crate::error::{CoreError, Result};
use crate::types::{Episode, EpisodeId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Episode record exactly as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    /// Episode slug
    pub id: String,
    /// Episode title
    pub title: String,
    /// Hosts and guests
    #[serde(default)]
    pub members: String,
    /// Cover image locator
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// HTML description
    #[serde(default)]
    pub description: Option<String>,
    /// Publication timestamp, in one of several textual shapes
    #[serde(default)]
    pub published_at: Option<String>,
    /// Playable media
    pub file: RawEpisodeFile,
}

/// Media block of a raw record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisodeFile {
    /// Media locator
    pub url: String,
    /// Media length in seconds
    pub duration: RawDuration,
}

/// Duration as it appears on the wire
///
/// Seen as integers, floats and numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    /// Integer seconds
    Seconds(u64),
    /// Fractional (or negative, which is rejected) seconds
    Fractional(f64),
    /// Seconds encoded as a string
    Text(String),
}

impl RawDuration {
    /// Whole seconds, floored
    pub fn to_seconds(&self) -> Result<u64> {
        match self {
            RawDuration::Seconds(secs) => Ok(*secs),
            RawDuration::Fractional(secs) => whole_seconds(*secs),
            RawDuration::Text(text) => {
                let text = text.trim();
                if let Ok(secs) = text.parse::<u64>() {
                    return Ok(secs);
                }
                let secs = text
                    .parse::<f64>()
                    .map_err(|_| CoreError::invalid_duration(format!("{text:?} is not a number")))?;
                whole_seconds(secs)
            }
        }
    }
}

fn whole_seconds(secs: f64) -> Result<u64> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(CoreError::invalid_duration(format!("{secs} seconds")));
    }
    Ok(secs.floor() as u64)
}

fn parse_published_at(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| CoreError::invalid_date(value.to_string()))
}

impl TryFrom<RawEpisode> for Episode {
    type Error = CoreError;

    fn try_from(raw: RawEpisode) -> Result<Self> {
        if raw.id.trim().is_empty() {
            return Err(CoreError::invalid_episode("missing id"));
        }
        if raw.file.url.trim().is_empty() {
            return Err(CoreError::invalid_episode(format!(
                "episode {} has no media url",
                raw.id
            )));
        }

        let duration = raw.file.duration.to_seconds()?;
        let published_at = match raw.published_at.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_published_at(value)?),
            _ => None,
        };

        Ok(Episode {
            id: EpisodeId::new(raw.id),
            title: raw.title,
            members: raw.members,
            url: raw.file.url,
            duration,
            thumbnail: raw.thumbnail,
            description: raw.description,
            published_at,
        })
    }
}

/// Parse a JSON array of backend records into episodes
///
/// Stops at the first record that fails to normalize.
pub fn parse_episodes(json: &str) -> Result<Vec<Episode>> {
    let records: Vec<RawEpisode> = serde_json::from_str(json)?;
    records.into_iter().map(Episode::try_from).collect()
}

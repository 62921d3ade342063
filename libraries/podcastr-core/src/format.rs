//! Display formatting shared by every surface
//!
//! The home list, the episode page and the player bar must render durations
//! and dates identically, so the formats live here rather than in each view.

use chrono::{DateTime, Utc};

/// Format a duration in whole seconds as `MM:SS`
///
/// Minutes are not folded into hours: an hour-long episode renders as `60:00`.
///
/// ```rust
/// use podcastr_core::convert_duration_to_time_string;
///
/// assert_eq!(convert_duration_to_time_string(0), "00:00");
/// assert_eq!(convert_duration_to_time_string(65), "01:05");
/// assert_eq!(convert_duration_to_time_string(3600), "60:00");
/// ```
pub fn convert_duration_to_time_string(seconds: u64) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", minutes, secs)
}

/// Format a publication timestamp as `d MMM yy` (e.g. `22 Jan 21`)
pub fn format_published_at(published_at: &DateTime<Utc>) -> String {
    published_at.format("%-d %b %y").to_string()
}

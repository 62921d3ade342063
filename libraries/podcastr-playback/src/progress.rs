//! Progress reporting
//!
//! Mirrors the audio element's position as whole seconds for display.
//! The mirrored value is never clamped; only the display value is.

use podcastr_core::convert_duration_to_time_string;

/// Elapsed-time mirror of the audio element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressReporter {
    elapsed: u64,
    media_duration: Option<u64>,
}

impl ProgressReporter {
    /// Create a reporter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a time update from the audio element
    ///
    /// Negative or non-finite positions read as zero. Returns true when the
    /// whole-second value changed.
    pub fn time_update(&mut self, position_secs: f64) -> bool {
        let elapsed = whole_seconds(position_secs);
        let changed = elapsed != self.elapsed;
        self.elapsed = elapsed;
        changed
    }

    /// Optimistically jump to `position` ahead of the element's echo
    pub fn seek(&mut self, position: u64) {
        self.elapsed = position;
    }

    /// New source loaded: back to zero, duration unknown until metadata
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.media_duration = None;
    }

    /// Metadata arrived for the loaded source
    pub fn metadata_loaded(&mut self, duration_secs: Option<f64>) {
        self.elapsed = 0;
        self.media_duration = duration_secs
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(whole_seconds);
    }

    /// Elapsed whole seconds
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Duration reported by the media itself, if known
    pub fn media_duration(&self) -> Option<u64> {
        self.media_duration
    }

    /// Seekable length: the media's own duration once known, else `fallback`
    pub fn seekable_duration(&self, fallback: u64) -> u64 {
        self.media_duration.unwrap_or(fallback)
    }

    /// Elapsed seconds clamped to `duration`
    pub fn display_elapsed(&self, duration: u64) -> u64 {
        self.elapsed.min(duration)
    }

    /// Clamped elapsed time as `MM:SS`
    pub fn elapsed_label(&self, duration: u64) -> String {
        convert_duration_to_time_string(self.display_elapsed(duration))
    }
}

fn whole_seconds(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    }
}

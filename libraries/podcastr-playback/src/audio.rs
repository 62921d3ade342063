//! Platform-agnostic audio element trait
//!
//! The session drives playback but never renders audio itself. Hosts provide
//! an [`AudioElement`] (an HTML `<audio>` element, a native player, a test
//! double) and report what actually happens back as [`AudioEvent`]s.

use crate::error::Result;
use crate::types::MediaSource;
use serde::{Deserialize, Serialize};

/// Playback primitive driven by the session
///
/// Calls are intents. In particular `play` returning `Ok` does not mean
/// audio started: the host confirms with [`AudioEvent::Playing`] or corrects
/// with [`AudioEvent::Paused`].
pub trait AudioElement {
    /// Load a new source, replacing whatever was loaded
    ///
    /// Events for this source must carry `source.ticket`.
    fn load(&mut self, source: &MediaSource) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Jump to `position_secs` from the start of the source
    fn seek(&mut self, position_secs: u64) -> Result<()>;

    /// Drop the loaded source
    fn unload(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Callback from the audio element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioEvent {
    /// Source metadata is available (`loadedmetadata`)
    MetadataLoaded {
        /// Media-reported length in seconds, when known
        duration: Option<f64>,
    },

    /// Playback position moved (`timeupdate`)
    TimeUpdate {
        /// Position in seconds
        position: f64,
    },

    /// Audio actually started (`play`)
    Playing,

    /// Audio actually stopped (`pause`), including refused play attempts
    Paused,

    /// Source reached its end (`ended`)
    Ended,
}

/// Audio element that records commands and does nothing else
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAudioElement {
    pub commands: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
}

#[cfg(test)]
impl AudioElement for RecordingAudioElement {
    fn load(&mut self, source: &MediaSource) -> Result<()> {
        self.commands.borrow_mut().push(format!("load {}", source.url));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.commands.borrow_mut().push("play".to_string());
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.borrow_mut().push("pause".to_string());
        Ok(())
    }

    fn seek(&mut self, position_secs: u64) -> Result<()> {
        self.commands.borrow_mut().push(format!("seek {}", position_secs));
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        self.commands.borrow_mut().push("unload".to_string());
        Ok(())
    }
}

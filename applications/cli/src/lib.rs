//! Podcastr CLI
//!
//! Terminal front end: lists an exported episode feed and plays it through a
//! [`podcastr_playback::PlayerSession`] backed by a simulated audio element.

pub mod config;
pub mod error;
pub mod listing;
pub mod repl;
pub mod simulated;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use repl::{Command, Repl};
pub use simulated::SimulatedAudio;

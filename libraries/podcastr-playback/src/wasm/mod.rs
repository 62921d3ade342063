//! WASM bindings for podcastr-playback
//!
//! This module provides WebAssembly bindings for the PlayerSession,
//! allowing the session to run in the browser next to an `<audio>` element.

pub mod audio;
pub mod session;
pub mod types;

pub use audio::HtmlAudioElementAdapter;
pub use session::WasmPlayerSession;
pub use types::WasmEpisode;

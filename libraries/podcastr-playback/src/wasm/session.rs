//! WASM wrapper for PlayerSession

use super::{audio::HtmlAudioElementAdapter, types::WasmEpisode};
use crate::{AudioEvent, LoadTicket, PlayerSession, SessionConfig};
use js_sys::Function;
use podcastr_core::Episode;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

type EventCallback = Rc<RefCell<Option<Function>>>;

/// WASM-compatible player session
///
/// Wraps [`PlayerSession`] for use from JavaScript. The page forwards the
/// `<audio>` element's events with the ticket read from its
/// `data-podcastr-ticket` attribute. Refused `play()` calls are reported
/// by the audio adapter itself, which is why the session is shared.
#[wasm_bindgen]
pub struct WasmPlayerSession {
    inner: Rc<RefCell<PlayerSession>>,
    on_event: EventCallback,
}

#[wasm_bindgen]
impl WasmPlayerSession {
    /// Create an empty session
    ///
    /// Pass a seed to make shuffle picks reproducible.
    #[wasm_bindgen(constructor)]
    pub fn new(shuffle_seed: Option<u32>) -> Self {
        console_error_panic_hook::set_once();

        Self {
            inner: Rc::new(RefCell::new(PlayerSession::new(SessionConfig {
                shuffle_seed: shuffle_seed.map(u64::from),
            }))),
            on_event: Rc::new(RefCell::new(None)),
        }
    }

    /// Attach the `<audio>` element the session drives
    #[wasm_bindgen(js_name = attachAudio)]
    pub fn attach_audio(&mut self, element: HtmlAudioElement) {
        let session = Rc::downgrade(&self.inner);
        let on_event = Rc::clone(&self.on_event);
        let on_play_rejected = Rc::new(move |ticket: LoadTicket| {
            let Some(session) = session.upgrade() else {
                return;
            };
            // Rejections settle in a microtask, never inside a session call
            let Ok(mut session) = session.try_borrow_mut() else {
                return;
            };
            session.handle_audio_event(ticket, AudioEvent::Paused);
            forward_events(&mut session, &on_event);
        });

        let adapter =
            HtmlAudioElementAdapter::new(element).with_play_rejected_handler(on_play_rejected);
        self.inner.borrow_mut().set_audio_element(Box::new(adapter));
        self.flush_events();
    }

    /// Register a callback receiving a snapshot after every change
    pub fn subscribe(&mut self, callback: Function) {
        self.inner.borrow_mut().subscribe(move |snapshot| {
            if let Ok(value) = serde_wasm_bindgen::to_value(snapshot) {
                callback.call1(&JsValue::NULL, &value).ok();
            }
        });
    }

    /// Register a callback receiving each [`PlayerEvent`](crate::PlayerEvent)
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        *self.on_event.borrow_mut() = Some(callback);
    }

    // ===== Queue Commands =====

    /// Play one episode
    pub fn play(&mut self, episode: JsValue) -> Result<(), JsValue> {
        let episode: WasmEpisode = serde_wasm_bindgen::from_value(episode)
            .map_err(|e| JsValue::from_str(&format!("Invalid episode: {}", e)))?;
        self.inner.borrow_mut().play(episode.into());
        self.flush_events();
        Ok(())
    }

    /// Replace the queue and play from `index`
    ///
    /// Negative indices select the first episode.
    #[wasm_bindgen(js_name = playList)]
    pub fn play_list(&mut self, episodes: JsValue, index: i32) -> Result<(), JsValue> {
        let episodes: Vec<WasmEpisode> = serde_wasm_bindgen::from_value(episodes)
            .map_err(|e| JsValue::from_str(&format!("Invalid episode list: {}", e)))?;
        let episodes: Vec<Episode> = episodes.into_iter().map(Episode::from).collect();
        let index = usize::try_from(index).unwrap_or(0);

        self.inner.borrow_mut().play_list(episodes, index);
        self.flush_events();
        Ok(())
    }

    /// Reset to an empty session
    #[wasm_bindgen(js_name = clearPlayerState)]
    pub fn clear_player_state(&mut self) {
        self.inner.borrow_mut().clear_player_state();
        self.flush_events();
    }

    // ===== Playback Control =====

    /// Flip play intent
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.borrow_mut().toggle_play();
        self.flush_events();
    }

    /// Record what the audio element actually did
    #[wasm_bindgen(js_name = setPlayingState)]
    pub fn set_playing_state(&mut self, playing: bool) {
        self.inner.borrow_mut().set_playing_state(playing);
        self.flush_events();
    }

    /// Flip looping
    #[wasm_bindgen(js_name = toggleLoop)]
    pub fn toggle_loop(&mut self) {
        self.inner.borrow_mut().toggle_loop();
        self.flush_events();
    }

    /// Flip shuffling
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.borrow_mut().toggle_shuffle();
        self.flush_events();
    }

    /// Move to the next episode
    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&mut self) -> bool {
        let moved = self.inner.borrow_mut().play_next();
        self.flush_events();
        moved
    }

    /// Move to the previous episode
    #[wasm_bindgen(js_name = playPrevious)]
    pub fn play_previous(&mut self) -> bool {
        let moved = self.inner.borrow_mut().play_previous();
        self.flush_events();
        moved
    }

    /// Seek to a position in seconds
    pub fn seek(&mut self, position: f64) -> bool {
        let position = if position.is_finite() && position > 0.0 {
            position.floor() as u64
        } else {
            0
        };
        let applied = self.inner.borrow_mut().seek(position);
        self.flush_events();
        applied
    }

    // ===== Audio Callbacks =====

    /// `loadedmetadata` from the audio element
    #[wasm_bindgen(js_name = onMetadataLoaded)]
    pub fn on_metadata_loaded(&mut self, ticket: u32, duration: Option<f64>) -> bool {
        self.audio_event(ticket, AudioEvent::MetadataLoaded { duration })
    }

    /// `timeupdate` from the audio element
    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self, ticket: u32, position: f64) -> bool {
        self.audio_event(ticket, AudioEvent::TimeUpdate { position })
    }

    /// `play` from the audio element
    #[wasm_bindgen(js_name = onPlaying)]
    pub fn on_playing(&mut self, ticket: u32) -> bool {
        self.audio_event(ticket, AudioEvent::Playing)
    }

    /// `pause` from the audio element
    #[wasm_bindgen(js_name = onPaused)]
    pub fn on_paused(&mut self, ticket: u32) -> bool {
        self.audio_event(ticket, AudioEvent::Paused)
    }

    /// `ended` from the audio element
    #[wasm_bindgen(js_name = onEnded)]
    pub fn on_ended(&mut self, ticket: u32) -> bool {
        self.audio_event(ticket, AudioEvent::Ended)
    }

    // ===== State Queries =====

    /// Current session snapshot as a plain object
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.borrow().snapshot())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Ticket of the loaded source
    #[wasm_bindgen(js_name = currentTicket)]
    pub fn current_ticket(&self) -> u32 {
        self.inner.borrow().current_ticket().as_raw()
    }

    /// Play intent
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.borrow().is_playing()
    }

    /// Whether there is a next episode
    #[wasm_bindgen(js_name = hasNext)]
    pub fn has_next(&self) -> bool {
        self.inner.borrow().has_next()
    }

    /// Whether there is a previous episode
    #[wasm_bindgen(js_name = hasPrevious)]
    pub fn has_previous(&self) -> bool {
        self.inner.borrow().has_previous()
    }

    /// Elapsed whole seconds
    pub fn elapsed(&self) -> f64 {
        self.inner.borrow().elapsed() as f64
    }

    /// Elapsed time as `MM:SS`
    #[wasm_bindgen(js_name = elapsedLabel)]
    pub fn elapsed_label(&self) -> String {
        let session = self.inner.borrow();
        let duration = session
            .current_episode()
            .map_or(0, |episode| episode.duration);
        session.progress().elapsed_label(duration)
    }
}

impl WasmPlayerSession {
    fn audio_event(&mut self, ticket: u32, event: AudioEvent) -> bool {
        let applied = self
            .inner
            .borrow_mut()
            .handle_audio_event(LoadTicket::from_raw(ticket), event);
        self.flush_events();
        applied
    }

    fn flush_events(&mut self) {
        forward_events(&mut self.inner.borrow_mut(), &self.on_event);
    }
}

fn forward_events(session: &mut PlayerSession, on_event: &EventCallback) {
    let events = session.drain_events();
    let callback = on_event.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };

    for event in events {
        if let Ok(value) = serde_wasm_bindgen::to_value(&event) {
            callback.call1(&JsValue::NULL, &value).ok();
        }
    }
}

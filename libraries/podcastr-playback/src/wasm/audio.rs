//! `AudioElement` over an HTML `<audio>` element

use crate::{AudioElement, LoadTicket, MediaSource, PlaybackError, Result};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::HtmlAudioElement;

/// Attribute holding the ticket of the loaded source
///
/// Event listeners read it back and pass it to the session with each event.
pub const TICKET_ATTRIBUTE: &str = "data-podcastr-ticket";

/// Called when the browser refuses a `play()` for the load with this ticket
pub type PlayRejectedHandler = Rc<dyn Fn(LoadTicket)>;

/// Drives a browser `<audio>` element
pub struct HtmlAudioElementAdapter {
    element: HtmlAudioElement,
    ticket: LoadTicket,
    on_play_rejected: Option<PlayRejectedHandler>,
}

impl HtmlAudioElementAdapter {
    /// Wrap an existing element
    pub fn new(element: HtmlAudioElement) -> Self {
        Self {
            element,
            ticket: LoadTicket::NONE,
            on_play_rejected: None,
        }
    }

    /// Report refused `play()` calls to `handler`
    pub fn with_play_rejected_handler(mut self, handler: PlayRejectedHandler) -> Self {
        self.on_play_rejected = Some(handler);
        self
    }
}

fn js_error(context: &str, err: JsValue) -> PlaybackError {
    PlaybackError::Audio(format!("{}: {:?}", context, err))
}

impl AudioElement for HtmlAudioElementAdapter {
    fn load(&mut self, source: &MediaSource) -> Result<()> {
        self.element
            .set_attribute(TICKET_ATTRIBUTE, &source.ticket.as_raw().to_string())
            .map_err(|e| js_error("set ticket", e))?;
        self.element.set_src(&source.url);
        self.element.load();
        self.ticket = source.ticket;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::PlayRejected(format!("{:?}", e)))?;

        // A refused play (autoplay policy, unsupported source) only rejects
        // the promise; the element fires no `pause` event for it.
        let ticket = self.ticket;
        let handler = self.on_play_rejected.clone();
        let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
            web_sys::console::warn_2(&JsValue::from_str("podcastr: play() rejected"), &err);
            if let Some(handler) = &handler {
                handler(ticket);
            }
        }) as Box<dyn FnMut(JsValue)>);
        let _ = promise.catch(&on_reject);
        on_reject.forget();

        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.element.pause().map_err(|e| js_error("pause", e))
    }

    fn seek(&mut self, position_secs: u64) -> Result<()> {
        self.element.set_current_time(position_secs as f64);
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        self.element.pause().map_err(|e| js_error("pause", e))?;
        self.element
            .remove_attribute("src")
            .map_err(|e| js_error("remove src", e))?;
        self.element
            .remove_attribute(TICKET_ATTRIBUTE)
            .map_err(|e| js_error("remove ticket", e))?;
        self.element.load();
        self.ticket = LoadTicket::NONE;
        Ok(())
    }
}

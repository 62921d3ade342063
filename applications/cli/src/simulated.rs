//! Simulated audio element
//!
//! Stands in for a real player in the terminal: nothing is decoded, a
//! virtual clock advances on demand. Like a browser element it reports
//! back asynchronously, so every callback is queued with the ticket of the
//! source it belongs to and handed to the session later.

use podcastr_playback::{AudioElement, AudioEvent, LoadTicket, MediaSource, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Default)]
struct SimulatedState {
    source: Option<MediaSource>,
    position: u64,
    playing: bool,
    pending: VecDeque<(LoadTicket, AudioEvent)>,
}

impl SimulatedState {
    fn ticket(&self) -> LoadTicket {
        self.source
            .as_ref()
            .map_or(LoadTicket::NONE, |source| source.ticket)
    }

    fn report(&mut self, event: AudioEvent) {
        let ticket = self.ticket();
        self.pending.push_back((ticket, event));
    }
}

/// Audio element driven by a virtual clock
///
/// Clones share state: hand one to the session and keep one to drive time.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAudio {
    state: Rc<RefCell<SimulatedState>>,
}

impl SimulatedAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket of the loaded source, `LoadTicket::NONE` when empty
    pub fn ticket(&self) -> LoadTicket {
        self.state.borrow().ticket()
    }

    /// URL of the loaded source
    pub fn loaded_url(&self) -> Option<String> {
        self.state
            .borrow()
            .source
            .as_ref()
            .map(|source| source.url.clone())
    }

    /// Virtual position in whole seconds
    pub fn position(&self) -> u64 {
        self.state.borrow().position
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    /// Advance the clock by `seconds` while playing
    ///
    /// Queues a time update, plus an end event once the position reaches
    /// the source duration.
    pub fn tick(&self, seconds: u64) {
        let mut state = self.state.borrow_mut();
        let Some(duration) = state.source.as_ref().map(|source| source.duration) else {
            return;
        };
        if !state.playing {
            return;
        }

        state.position = state.position.saturating_add(seconds).min(duration);
        let position = state.position;
        state.report(AudioEvent::TimeUpdate {
            position: position as f64,
        });

        if position >= duration {
            state.playing = false;
            state.report(AudioEvent::Ended);
        }
    }

    /// Jump to the end of the loaded source, playing or not
    pub fn finish(&self) {
        let mut state = self.state.borrow_mut();
        let Some(duration) = state.source.as_ref().map(|source| source.duration) else {
            return;
        };

        state.position = duration;
        state.playing = false;
        state.report(AudioEvent::Ended);
    }

    /// Take the next queued callback
    pub fn next_event(&self) -> Option<(LoadTicket, AudioEvent)> {
        self.state.borrow_mut().pending.pop_front()
    }
}

impl AudioElement for SimulatedAudio {
    fn load(&mut self, source: &MediaSource) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.source = Some(source.clone());
        state.position = 0;
        state.playing = false;
        state.report(AudioEvent::MetadataLoaded {
            duration: Some(source.duration as f64),
        });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.source.is_some() {
            state.playing = true;
            state.report(AudioEvent::Playing);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.playing = false;
        state.report(AudioEvent::Paused);
        Ok(())
    }

    fn seek(&mut self, position_secs: u64) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.position = position_secs;
        let position = state.position;
        state.report(AudioEvent::TimeUpdate {
            position: position as f64,
        });
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.source = None;
        state.position = 0;
        state.playing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcastr_core::Episode;
    use podcastr_playback::{PlayerSession, SessionConfig};

    fn session_with(audio: &SimulatedAudio) -> PlayerSession {
        let mut session = PlayerSession::new(SessionConfig::default());
        session.set_audio_element(Box::new(audio.clone()));
        session
    }

    fn pump(session: &mut PlayerSession, audio: &SimulatedAudio) {
        while let Some((ticket, event)) = audio.next_event() {
            session.handle_audio_event(ticket, event);
        }
    }

    #[test]
    fn ticks_only_while_playing() {
        let audio = SimulatedAudio::new();
        let mut session = session_with(&audio);
        session.play(Episode::new("a", "A", "Host", "https://cdn/a.mp3", 10));
        pump(&mut session, &audio);

        audio.tick(3);
        pump(&mut session, &audio);
        assert_eq!(session.elapsed(), 3);

        session.toggle_play();
        pump(&mut session, &audio);
        audio.tick(3);
        pump(&mut session, &audio);
        assert_eq!(session.elapsed(), 3);
    }

    #[test]
    fn reaching_the_end_reports_ended() {
        let audio = SimulatedAudio::new();
        let mut session = session_with(&audio);
        session.play(Episode::new("a", "A", "Host", "https://cdn/a.mp3", 10));
        pump(&mut session, &audio);

        audio.tick(25);
        pump(&mut session, &audio);

        assert!(session.current_episode().is_none());
        assert_eq!(audio.loaded_url(), None);
    }

    #[test]
    fn events_for_a_replaced_source_are_stale() {
        let audio = SimulatedAudio::new();
        let mut session = session_with(&audio);
        session.play(Episode::new("a", "A", "Host", "https://cdn/a.mp3", 10));
        audio.tick(4);
        let (stale_ticket, _) = audio.next_event().expect("metadata queued");

        session.play(Episode::new("b", "B", "Host", "https://cdn/b.mp3", 10));

        assert_ne!(stale_ticket, session.current_ticket());
        assert_eq!(audio.ticket(), session.current_ticket());
        assert!(!session.handle_audio_event(
            stale_ticket,
            AudioEvent::TimeUpdate { position: 4.0 }
        ));
    }
}

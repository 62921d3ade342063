//! Player session - core orchestration
//!
//! Coordinates queue, mode flags, navigation, progress and the audio element.
//! All state changes go through the commands on [`PlayerSession`]; surfaces
//! read snapshots and never mutate anything directly.

use crate::{
    audio::{AudioElement, AudioEvent},
    error::Result,
    events::PlayerEvent,
    modes::{shuffle_available, PlaybackModes},
    navigation::{Cursor, TrackEndAction},
    progress::ProgressReporter,
    queue::EpisodeQueue,
    subscription::{Subscribers, SubscriptionId},
    types::{LoadTicket, MediaSource, SessionConfig, SessionSnapshot},
};
use podcastr_core::Episode;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

/// Central playback session
///
/// One instance per application, created empty and passed by reference to
/// every surface that plays or displays episodes.
///
/// Each command applies its whole transition before subscribers are
/// notified, so no surface ever observes a half-applied change. The audio
/// element is driven as a side effect of transitions; it only reports back
/// through [`handle_audio_event`](Self::handle_audio_event).
pub struct PlayerSession {
    // State
    queue: EpisodeQueue,
    modes: PlaybackModes,
    is_playing: bool,
    progress: ProgressReporter,

    // Identity of the source currently loaded into the audio element
    ticket: LoadTicket,

    audio: Option<Box<dyn AudioElement>>,
    rng: StdRng,

    subscribers: Subscribers,
    pending_events: Vec<PlayerEvent>,
}

impl PlayerSession {
    /// Create an empty session
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            queue: EpisodeQueue::new(),
            modes: PlaybackModes::default(),
            is_playing: false,
            progress: ProgressReporter::new(),
            ticket: LoadTicket::NONE,
            audio: None,
            rng,
            subscribers: Subscribers::new(),
            pending_events: Vec::new(),
        }
    }

    /// Attach the audio element the session drives
    ///
    /// If an episode is already current it is loaded into the new element
    /// (and started, if the session intends to play).
    pub fn set_audio_element(&mut self, audio: Box<dyn AudioElement>) {
        self.audio = Some(audio);
        if self.queue.current().is_some() {
            let previous = self.current_episode_id();
            self.switch_episode(previous);
            self.publish();
        }
    }

    // ===== Subscriptions =====

    /// Register a callback invoked with a snapshot after every change
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&SessionSnapshot) + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`subscribe`](Self::subscribe)
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // ===== Queue Commands =====

    /// Play exactly one episode, replacing the queue
    pub fn play(&mut self, episode: Episode) {
        debug!(episode = %episode.id, "play single episode");
        let previous = self.current_episode_id();

        self.queue.set_single(episode);
        self.pending_events.push(PlayerEvent::QueueChanged { length: 1 });
        self.set_intent(true);
        self.switch_episode(previous);

        self.publish();
    }

    /// Replace the queue with `episodes` and play from `index`
    ///
    /// The index is clamped to the last episode. An empty list leaves the
    /// session with nothing selected and not playing.
    pub fn play_list(&mut self, episodes: Vec<Episode>, index: usize) {
        info!(length = episodes.len(), index, "play episode list");
        let previous = self.current_episode_id();

        self.queue.set(episodes, index);
        self.pending_events.push(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.set_intent(!self.queue.is_empty());
        self.switch_episode(previous);

        self.publish();
    }

    /// Reset to an empty session: no queue, no selection, all flags off
    pub fn clear_player_state(&mut self) {
        debug!("clear player state");
        let previous = self.current_episode_id();
        let modes_changed = self.modes != PlaybackModes::default();

        self.queue.clear();
        self.pending_events.push(PlayerEvent::QueueChanged { length: 0 });
        self.modes.reset();
        if modes_changed {
            self.emit_modes_changed();
        }
        self.set_intent(false);
        self.switch_episode(previous);

        self.publish();
    }

    // ===== Playback Control =====

    /// Flip play intent; no-op on an empty queue
    pub fn toggle_play(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        let playing = !self.is_playing;
        debug!(playing, "toggle play");
        self.set_intent(playing);
        if playing {
            self.start_audio();
        } else {
            self.drive(|audio| audio.pause());
        }

        self.publish();
    }

    /// Set play intent to match what the audio element actually did
    ///
    /// Does not drive the audio element. Forced to false on an empty queue.
    pub fn set_playing_state(&mut self, playing: bool) {
        let playing = playing && !self.queue.is_empty();
        if self.set_intent(playing) {
            self.publish();
        }
    }

    /// Flip looping
    pub fn toggle_loop(&mut self) {
        let looping = self.modes.toggle_loop();
        debug!(looping, "toggle loop");
        self.emit_modes_changed();
        self.publish();
    }

    /// Flip shuffling
    pub fn toggle_shuffle(&mut self) {
        let shuffling = self.modes.toggle_shuffle();
        debug!(shuffling, "toggle shuffle");
        self.emit_modes_changed();
        self.publish();
    }

    // ===== Navigation =====

    /// Move to the next episode
    ///
    /// Returns false, changing nothing, when there is no next episode.
    pub fn play_next(&mut self) -> bool {
        match self.cursor().next_index(&mut self.rng) {
            Some(index) => {
                debug!(index, "play next");
                self.move_to(index);
                true
            }
            None => false,
        }
    }

    /// Move to the previous episode
    ///
    /// Returns false, changing nothing, when there is no previous episode.
    pub fn play_previous(&mut self) -> bool {
        match self.cursor().previous_index(&mut self.rng) {
            Some(index) => {
                debug!(index, "play previous");
                self.move_to(index);
                true
            }
            None => false,
        }
    }

    /// The current episode finished
    ///
    /// Looping restarts it, otherwise the session advances and keeps
    /// playing, otherwise the queue is exhausted and the session is cleared.
    pub fn on_track_ended(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        match self.cursor().track_end_action(self.modes.looping, &mut self.rng) {
            TrackEndAction::Replay(index) => {
                debug!(index, "replay looping episode");
                self.progress.seek(0);
                self.drive(|audio| audio.seek(0));
                self.set_intent(true);
                self.start_audio();
                if let Some(episode) = self.queue.current() {
                    self.pending_events.push(PlayerEvent::EpisodeReplayed {
                        episode_id: episode.id.to_string(),
                    });
                }
                self.pending_events
                    .push(PlayerEvent::ProgressUpdated { elapsed: 0 });
                self.publish();
            }
            TrackEndAction::Advance(index) => {
                debug!(index, "advance after episode ended");
                let previous = self.current_episode_id();
                self.queue.select(index);
                self.set_intent(true);
                self.switch_episode(previous);
                self.publish();
            }
            TrackEndAction::Exhausted => {
                info!("queue exhausted");
                self.pending_events.push(PlayerEvent::QueueExhausted);
                self.clear_player_state();
            }
        }
    }

    // ===== Progress =====

    /// Seek the current episode to `position` seconds
    ///
    /// The position is clamped to the media's reported duration (the feed
    /// duration until metadata arrives) and shown immediately, ahead of the
    /// audio element's own time update. Returns false when nothing is loaded.
    pub fn seek(&mut self, position: u64) -> bool {
        let Some(duration) = self.queue.current().map(|episode| episode.duration) else {
            return false;
        };

        let position = position.min(self.progress.seekable_duration(duration));
        debug!(position, "seek");
        self.progress.seek(position);
        self.drive(|audio| audio.seek(position));
        self.pending_events
            .push(PlayerEvent::ProgressUpdated { elapsed: position });

        self.publish();
        true
    }

    // ===== Audio Callbacks =====

    /// Apply a callback from the audio element
    ///
    /// Events stamped with a ticket other than the current load's are stale
    /// (they belong to a superseded episode) and are discarded. Returns
    /// whether the event was applied.
    pub fn handle_audio_event(&mut self, ticket: LoadTicket, event: AudioEvent) -> bool {
        if ticket != self.ticket || self.queue.is_empty() {
            debug!(%ticket, current = %self.ticket, ?event, "discarding stale audio event");
            return false;
        }

        match event {
            AudioEvent::MetadataLoaded { duration } => {
                self.progress.metadata_loaded(duration);
                self.pending_events
                    .push(PlayerEvent::ProgressUpdated { elapsed: 0 });
                self.publish();
            }
            AudioEvent::TimeUpdate { position } => {
                if self.progress.time_update(position) {
                    self.pending_events.push(PlayerEvent::ProgressUpdated {
                        elapsed: self.progress.elapsed(),
                    });
                    self.publish();
                }
            }
            AudioEvent::Playing => self.set_playing_state(true),
            AudioEvent::Paused => self.set_playing_state(false),
            AudioEvent::Ended => self.on_track_ended(),
        }

        true
    }

    // ===== State Queries =====

    /// Everything a surface may render
    pub fn snapshot(&self) -> SessionSnapshot {
        let cursor = self.cursor();
        SessionSnapshot {
            current_episode: self.queue.current().cloned(),
            current_index: self.queue.current_index(),
            queue_len: self.queue.len(),
            is_playing: self.is_playing,
            is_looping: self.modes.looping,
            is_shuffling: self.modes.shuffling,
            has_next: cursor.has_next(),
            has_previous: cursor.has_previous(),
            shuffle_available: shuffle_available(self.queue.len()),
            elapsed: self.progress.elapsed(),
        }
    }

    /// Episode at the current index
    pub fn current_episode(&self) -> Option<&Episode> {
        self.queue.current()
    }

    /// Current index into the queue
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Queued episodes, in order
    pub fn episodes(&self) -> &[Episode] {
        self.queue.episodes()
    }

    /// Number of queued episodes
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Play intent
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Looping flag
    pub fn is_looping(&self) -> bool {
        self.modes.looping
    }

    /// Shuffling flag
    pub fn is_shuffling(&self) -> bool {
        self.modes.shuffling
    }

    /// Whether [`play_next`](Self::play_next) would move
    pub fn has_next(&self) -> bool {
        self.cursor().has_next()
    }

    /// Whether [`play_previous`](Self::play_previous) would move
    pub fn has_previous(&self) -> bool {
        self.cursor().has_previous()
    }

    /// Whether the shuffle control means anything for this queue
    pub fn shuffle_available(&self) -> bool {
        shuffle_available(self.queue.len())
    }

    /// Elapsed whole seconds of the current episode
    pub fn elapsed(&self) -> u64 {
        self.progress.elapsed()
    }

    /// Progress reporter for the current episode
    pub fn progress(&self) -> &ProgressReporter {
        &self.progress
    }

    /// Ticket of the source currently loaded
    pub fn current_ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Navigation view of the current state
    pub fn cursor(&self) -> Cursor {
        Cursor::new(
            self.queue.len(),
            self.queue.current_index(),
            self.modes.shuffling,
        )
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn current_episode_id(&self) -> Option<String> {
        self.queue.current().map(|episode| episode.id.to_string())
    }

    fn move_to(&mut self, index: usize) {
        let previous = self.current_episode_id();
        self.queue.select(index);
        self.switch_episode(previous);
        self.publish();
    }

    /// Load whatever is now current (or unload if nothing is)
    ///
    /// Always issues a new ticket, which retires callbacks for the old source.
    fn switch_episode(&mut self, previous_episode_id: Option<String>) {
        self.progress.reset();
        self.ticket = self.ticket.next();

        let episode_id = self.current_episode_id();
        let index = self.queue.current_index();
        self.pending_events.push(PlayerEvent::EpisodeChanged {
            episode_id,
            previous_episode_id,
            index,
        });

        let source = self
            .queue
            .current()
            .map(|episode| MediaSource::for_episode(episode, self.ticket));

        match source {
            Some(source) => {
                debug!(ticket = %source.ticket, url = %source.url, "load source");
                self.drive(|audio| audio.load(&source));
                if self.is_playing {
                    self.start_audio();
                }
            }
            None => {
                self.drive(|audio| audio.unload());
            }
        }
    }

    /// Ask the element to play; a refusal drops the play intent
    fn start_audio(&mut self) {
        if !self.drive(|audio| audio.play()) {
            self.set_intent(false);
        }
    }

    /// Update play intent, returning whether it changed
    fn set_intent(&mut self, playing: bool) -> bool {
        if self.is_playing == playing {
            return false;
        }
        self.is_playing = playing;
        self.pending_events
            .push(PlayerEvent::PlayingChanged { is_playing: playing });
        true
    }

    fn emit_modes_changed(&mut self) {
        self.pending_events.push(PlayerEvent::ModesChanged {
            is_looping: self.modes.looping,
            is_shuffling: self.modes.shuffling,
        });
    }

    /// Run a command against the audio element, if one is attached
    ///
    /// Failures are logged and queued as events; returns false on failure.
    fn drive(&mut self, command: impl FnOnce(&mut dyn AudioElement) -> Result<()>) -> bool {
        let Some(audio) = self.audio.as_mut() else {
            return true;
        };

        match command(&mut **audio) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "audio element command failed");
                self.pending_events.push(PlayerEvent::AudioError {
                    message: err.to_string(),
                });
                false
            }
        }
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers.notify(&snapshot);
    }
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudioElement;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_test_episode(id: &str, duration: u64) -> Episode {
        Episode::new(id, format!("Episode {}", id), "Host", format!("https://cdn/{}.mp3", id), duration)
    }

    fn session_with_recorder() -> (PlayerSession, Rc<RefCell<Vec<String>>>) {
        let recorder = RecordingAudioElement::default();
        let commands = Rc::clone(&recorder.commands);
        let mut session = PlayerSession::new(SessionConfig {
            shuffle_seed: Some(42),
        });
        session.set_audio_element(Box::new(recorder));
        (session, commands)
    }

    #[test]
    fn new_session_is_empty() {
        let session = PlayerSession::default();

        assert!(session.current_episode().is_none());
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
        assert!(!session.is_looping());
        assert!(!session.is_shuffling());
        assert!(!session.has_next());
        assert!(!session.has_previous());
        assert_eq!(session.elapsed(), 0);
        assert_eq!(session.current_ticket(), LoadTicket::NONE);
    }

    #[test]
    fn play_loads_and_starts_audio() {
        let (mut session, commands) = session_with_recorder();
        session.play(create_test_episode("a", 100));

        assert_eq!(
            *commands.borrow(),
            vec!["load https://cdn/a.mp3".to_string(), "play".to_string()]
        );
        assert!(session.is_playing());
    }

    #[test]
    fn toggle_play_drives_pause_and_play() {
        let (mut session, commands) = session_with_recorder();
        session.play(create_test_episode("a", 100));
        commands.borrow_mut().clear();

        session.toggle_play();
        assert!(!session.is_playing());
        session.toggle_play();
        assert!(session.is_playing());

        assert_eq!(*commands.borrow(), vec!["pause".to_string(), "play".to_string()]);
    }

    #[test]
    fn toggle_play_on_empty_queue_is_a_no_op() {
        let (mut session, commands) = session_with_recorder();
        session.toggle_play();

        assert!(!session.is_playing());
        assert!(commands.borrow().is_empty());
        assert!(!session.has_pending_events());
    }

    #[test]
    fn set_playing_state_never_plays_nothing() {
        let mut session = PlayerSession::default();
        session.set_playing_state(true);
        assert!(!session.is_playing());
    }

    #[test]
    fn clear_unloads_and_resets_flags() {
        let (mut session, commands) = session_with_recorder();
        session.play_list(
            vec![create_test_episode("a", 100), create_test_episode("b", 100)],
            0,
        );
        session.toggle_loop();
        session.toggle_shuffle();
        session.seek(30);
        commands.borrow_mut().clear();

        session.clear_player_state();

        assert_eq!(*commands.borrow(), vec!["unload".to_string()]);
        assert_eq!(session.queue_len(), 0);
        assert!(!session.is_playing());
        assert!(!session.is_looping());
        assert!(!session.is_shuffling());
        assert_eq!(session.elapsed(), 0);
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let (mut session, commands) = session_with_recorder();
        session.play(create_test_episode("a", 100));
        commands.borrow_mut().clear();

        assert!(session.seek(250));
        assert_eq!(session.elapsed(), 100);
        assert_eq!(*commands.borrow(), vec!["seek 100".to_string()]);
    }

    #[test]
    fn seek_is_clamped_to_media_duration_once_known() {
        let (mut session, commands) = session_with_recorder();
        session.play(create_test_episode("a", 100));
        let ticket = session.current_ticket();
        session.handle_audio_event(ticket, AudioEvent::MetadataLoaded { duration: Some(130.8) });
        commands.borrow_mut().clear();

        assert!(session.seek(500));
        assert_eq!(session.elapsed(), 130);
        assert_eq!(*commands.borrow(), vec!["seek 130".to_string()]);

        session.seek(115);
        assert_eq!(session.elapsed(), 115);
    }

    #[test]
    fn seek_without_episode_does_nothing() {
        let mut session = PlayerSession::default();
        assert!(!session.seek(10));
        assert_eq!(session.elapsed(), 0);
    }

    #[test]
    fn attaching_audio_late_loads_current_episode() {
        let mut session = PlayerSession::default();
        session.play(create_test_episode("a", 100));
        let before = session.current_ticket();

        let recorder = RecordingAudioElement::default();
        let commands = Rc::clone(&recorder.commands);
        session.set_audio_element(Box::new(recorder));

        assert_ne!(session.current_ticket(), before);
        assert_eq!(
            *commands.borrow(),
            vec!["load https://cdn/a.mp3".to_string(), "play".to_string()]
        );
    }

    #[test]
    fn events_describe_a_play_list() {
        let mut session = PlayerSession::default();
        session.play_list(
            vec![create_test_episode("a", 100), create_test_episode("b", 100)],
            1,
        );

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![
                PlayerEvent::QueueChanged { length: 2 },
                PlayerEvent::PlayingChanged { is_playing: true },
                PlayerEvent::EpisodeChanged {
                    episode_id: Some("b".to_string()),
                    previous_episode_id: None,
                    index: Some(1),
                },
            ]
        );
        assert!(!session.has_pending_events());
    }
}

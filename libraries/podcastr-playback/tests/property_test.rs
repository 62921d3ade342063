//! Property-based tests for the player session
//!
//! Uses proptest to check session invariants across random queues and
//! command sequences.

use podcastr_core::Episode;
use podcastr_playback::{AudioEvent, Cursor, PlayerSession, SessionConfig};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Helpers =====

fn arbitrary_episode() -> impl Strategy<Value = Episode> {
    (
        "[a-z0-9]{1,10}",  // id
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z ]{1,20}", // members
        0u64..7200,        // duration
    )
        .prop_map(|(id, title, members, duration)| {
            let url = format!("https://cdn.example.com/{}.mp3", id);
            Episode::new(id, title, members, url, duration)
        })
}

fn arbitrary_episodes() -> impl Strategy<Value = Vec<Episode>> {
    prop::collection::vec(arbitrary_episode(), 0..20)
}

#[derive(Debug, Clone)]
enum Command {
    TogglePlay,
    ToggleLoop,
    ToggleShuffle,
    Next,
    Previous,
    Seek(u64),
    TimeUpdate(f64),
    Ended,
    Playing,
    Paused,
}

fn arbitrary_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::TogglePlay),
        Just(Command::ToggleLoop),
        Just(Command::ToggleShuffle),
        Just(Command::Next),
        Just(Command::Previous),
        (0u64..10_000).prop_map(Command::Seek),
        (-10.0f64..10_000.0).prop_map(Command::TimeUpdate),
        Just(Command::Ended),
        Just(Command::Playing),
        Just(Command::Paused),
    ]
}

fn apply(session: &mut PlayerSession, command: &Command) {
    let ticket = session.current_ticket();
    match command {
        Command::TogglePlay => session.toggle_play(),
        Command::ToggleLoop => session.toggle_loop(),
        Command::ToggleShuffle => session.toggle_shuffle(),
        Command::Next => {
            session.play_next();
        }
        Command::Previous => {
            session.play_previous();
        }
        Command::Seek(position) => {
            session.seek(*position);
        }
        Command::TimeUpdate(position) => {
            session.handle_audio_event(ticket, AudioEvent::TimeUpdate { position: *position });
        }
        Command::Ended => {
            session.handle_audio_event(ticket, AudioEvent::Ended);
        }
        Command::Playing => {
            session.handle_audio_event(ticket, AudioEvent::Playing);
        }
        Command::Paused => {
            session.handle_audio_event(ticket, AudioEvent::Paused);
        }
    }
}

fn seeded_session(seed: u64) -> PlayerSession {
    PlayerSession::new(SessionConfig {
        shuffle_seed: Some(seed),
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: the current index is always inside the queue, and present
    /// exactly when the queue is non-empty
    #[test]
    fn current_index_stays_in_bounds(
        episodes in arbitrary_episodes(),
        start in 0usize..40,
        commands in prop::collection::vec(arbitrary_command(), 0..60),
        seed in any::<u64>(),
    ) {
        let mut session = seeded_session(seed);
        session.play_list(episodes, start);

        for command in &commands {
            apply(&mut session, command);

            let len = session.queue_len();
            match session.current_index() {
                Some(index) => prop_assert!(index < len),
                None => prop_assert_eq!(len, 0),
            }
            prop_assert_eq!(session.current_episode().is_some(), len > 0);
        }
    }

    /// Property: play_list selects min(start, len - 1)
    #[test]
    fn start_index_is_clamped(
        episodes in prop::collection::vec(arbitrary_episode(), 1..20),
        start in 0usize..100,
    ) {
        let len = episodes.len();
        let mut session = PlayerSession::default();
        session.play_list(episodes, start);

        prop_assert_eq!(session.current_index(), Some(start.min(len - 1)));
        prop_assert!(session.is_playing());
    }

    /// Property: an empty queue never plays and has nowhere to go
    #[test]
    fn empty_queue_is_inert(
        commands in prop::collection::vec(arbitrary_command(), 0..30),
    ) {
        let mut session = PlayerSession::default();
        for command in &commands {
            apply(&mut session, command);
            prop_assert!(!session.is_playing());
            prop_assert!(!session.has_next());
            prop_assert!(!session.has_previous());
            prop_assert_eq!(session.elapsed(), 0);
        }
    }

    /// Property: sequential has_next/has_previous follow the index
    #[test]
    fn sequential_neighbours_follow_index(
        len in 1usize..50,
        index_seed in any::<usize>(),
    ) {
        let index = index_seed % len;
        let cursor = Cursor::new(len, Some(index), false);

        prop_assert_eq!(cursor.has_next(), index + 1 < len);
        prop_assert_eq!(cursor.has_previous(), index > 0);
    }

    /// Property: shuffled neighbours exist exactly when there are two or more
    /// episodes, and every draw lands inside the queue
    #[test]
    fn shuffle_draws_stay_in_queue(
        len in 1usize..50,
        index_seed in any::<usize>(),
        seed in any::<u64>(),
    ) {
        let cursor = Cursor::new(len, Some(index_seed % len), true);
        let mut rng = StdRng::seed_from_u64(seed);

        prop_assert_eq!(cursor.has_next(), len > 1);
        prop_assert_eq!(cursor.has_previous(), len > 1);
        for _ in 0..10 {
            match cursor.next_index(&mut rng) {
                Some(next) => prop_assert!(next < len),
                None => prop_assert_eq!(len, 1),
            }
        }
    }

    /// Property: refused navigation leaves the snapshot untouched
    #[test]
    fn refused_navigation_is_a_no_op(
        episodes in prop::collection::vec(arbitrary_episode(), 1..20),
        at_start in any::<bool>(),
    ) {
        let len = episodes.len();
        let mut session = PlayerSession::default();
        let start = if at_start { 0 } else { len - 1 };
        session.play_list(episodes, start);
        let before = session.snapshot();
        let ticket = session.current_ticket();

        let moved = if at_start {
            session.play_previous()
        } else {
            session.play_next()
        };

        prop_assert!(!moved);
        prop_assert_eq!(session.snapshot(), before);
        prop_assert_eq!(session.current_ticket(), ticket);
    }

    /// Property: seek never goes past the episode
    #[test]
    fn seek_never_exceeds_duration(
        episode in arbitrary_episode(),
        position in any::<u64>(),
    ) {
        let duration = episode.duration;
        let mut session = PlayerSession::default();
        session.play(episode);

        prop_assert!(session.seek(position));
        prop_assert_eq!(session.elapsed(), position.min(duration));
    }

    /// Property: the displayed elapsed time never exceeds the duration
    #[test]
    fn display_elapsed_is_clamped(
        episode in arbitrary_episode(),
        position in -100.0f64..20_000.0,
    ) {
        let duration = episode.duration;
        let mut session = PlayerSession::default();
        session.play(episode);
        let ticket = session.current_ticket();

        session.handle_audio_event(ticket, AudioEvent::TimeUpdate { position });

        prop_assert!(session.snapshot().display_elapsed() <= duration);
    }

    /// Property: the same seed yields the same shuffled path
    #[test]
    fn shuffle_is_reproducible_with_a_seed(
        episodes in prop::collection::vec(arbitrary_episode(), 2..20),
        seed in any::<u64>(),
        steps in 1usize..30,
    ) {
        let path = |episodes: Vec<Episode>| {
            let mut session = seeded_session(seed);
            session.play_list(episodes, 0);
            session.toggle_shuffle();
            (0..steps)
                .map(|_| {
                    session.play_next();
                    session.current_index()
                })
                .collect::<Vec<_>>()
        };

        prop_assert_eq!(path(episodes.clone()), path(episodes));
    }
}

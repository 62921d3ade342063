//! Queue navigation
//!
//! Pure index arithmetic over queue length, current index and the shuffle
//! flag. Every path that needs to know what comes next (buttons, end of
//! track, derived has-next/has-previous) goes through here.
//!
//! Shuffle has no history: "previous" under shuffle is just another random
//! pick, and a draw may land on the current index again.

use rand::Rng;

/// Position within a queue, as navigation sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Queue length
    pub len: usize,

    /// Current index (`None` only for an empty queue)
    pub index: Option<usize>,

    /// Shuffle flag
    pub shuffling: bool,
}

/// What to do when the current episode finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEndAction {
    /// Looping: start the same index again
    Replay(usize),

    /// Move on to this index and keep playing
    Advance(usize),

    /// Nothing left to play
    Exhausted,
}

impl Cursor {
    /// Create a cursor
    pub fn new(len: usize, index: Option<usize>, shuffling: bool) -> Self {
        Self {
            len,
            index,
            shuffling,
        }
    }

    /// Whether there is a next episode
    pub fn has_next(&self) -> bool {
        if self.shuffling {
            return self.len > 1;
        }
        self.index.is_some_and(|index| index + 1 < self.len)
    }

    /// Whether there is a previous episode
    pub fn has_previous(&self) -> bool {
        if self.shuffling {
            return self.len > 1;
        }
        self.index.is_some_and(|index| index > 0)
    }

    /// Index to move to on "next", or `None` when there is no next
    ///
    /// Sequential navigation never wraps around.
    pub fn next_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if !self.has_next() {
            return None;
        }
        if self.shuffling {
            return Some(rng.gen_range(0..self.len));
        }
        self.index.map(|index| index + 1)
    }

    /// Index to move to on "previous", or `None` when there is no previous
    pub fn previous_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if !self.has_previous() {
            return None;
        }
        if self.shuffling {
            return Some(rng.gen_range(0..self.len));
        }
        self.index.map(|index| index - 1)
    }

    /// End-of-track policy
    ///
    /// Looping replays, otherwise advance if possible, otherwise the queue is
    /// exhausted. With no current index there is nothing to replay or advance.
    pub fn track_end_action<R: Rng + ?Sized>(&self, looping: bool, rng: &mut R) -> TrackEndAction {
        let Some(index) = self.index else {
            return TrackEndAction::Exhausted;
        };

        if looping {
            return TrackEndAction::Replay(index);
        }

        match self.next_index(rng) {
            Some(next) => TrackEndAction::Advance(next),
            None => TrackEndAction::Exhausted,
        }
    }
}

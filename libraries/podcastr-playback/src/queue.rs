//! Episode queue
//!
//! An ordered snapshot of episodes plus a pointer to the current one.
//! The pointer is `None` exactly when the queue is empty.

use podcastr_core::Episode;

/// Ordered episode list with a current entry
#[derive(Debug, Clone, Default)]
pub struct EpisodeQueue {
    episodes: Vec<Episode>,
    current: Option<usize>,
}

impl EpisodeQueue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with `episodes`, starting at `start_index`
    ///
    /// The index is clamped to the last episode. An empty list leaves no
    /// selection.
    pub fn set(&mut self, episodes: Vec<Episode>, start_index: usize) {
        self.current = match episodes.len() {
            0 => None,
            len => Some(start_index.min(len - 1)),
        };
        self.episodes = episodes;
    }

    /// Replace the queue with a single episode
    pub fn set_single(&mut self, episode: Episode) {
        self.set(vec![episode], 0);
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.episodes.clear();
        self.current = None;
    }

    /// Move the pointer to `index`
    ///
    /// Returns false (and leaves the pointer alone) when out of bounds.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.episodes.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Current index
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Current episode
    pub fn current(&self) -> Option<&Episode> {
        self.current.and_then(|index| self.episodes.get(index))
    }

    /// Episode at `index`
    pub fn get(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index)
    }

    /// All queued episodes, in order
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Number of queued episodes
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

//! Episode catalog
//!
//! Orders fetched episodes the way the home list shows them: newest first,
//! with the first few highlighted as "latest" and the remainder listed below.
//! The play queue built from the home list is `latest ++ others`, so a row in
//! the lower list starts the queue at an offset past the highlighted ones.

use crate::types::{Episode, EpisodeId};
use std::cmp::Ordering;

/// Newest-first episode listing split into latest and others
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeCatalog {
    episodes: Vec<Episode>,
    latest_count: usize,
}

impl EpisodeCatalog {
    /// Build a catalog, sorting by publication date (newest first)
    ///
    /// Undated episodes sort after dated ones; ties keep their fetch order.
    pub fn new(mut episodes: Vec<Episode>, latest_count: usize) -> Self {
        episodes.sort_by(|a, b| match (&a.published_at, &b.published_at) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Self {
            episodes,
            latest_count,
        }
    }

    /// Keep only the newest `limit` episodes
    pub fn truncate(&mut self, limit: usize) {
        self.episodes.truncate(limit);
    }

    /// Every episode, in queue order
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Highlighted newest episodes
    pub fn latest(&self) -> &[Episode] {
        &self.episodes[..self.split()]
    }

    /// Episodes after the highlighted ones
    pub fn others(&self) -> &[Episode] {
        &self.episodes[self.split()..]
    }

    /// Queue index of row `index` in [`others`](Self::others)
    pub fn queue_index_of_other(&self, index: usize) -> usize {
        index + self.split()
    }

    /// Queue index of an episode by id
    pub fn position(&self, id: &EpisodeId) -> Option<usize> {
        self.episodes.iter().position(|episode| &episode.id == id)
    }

    /// Number of episodes
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    fn split(&self) -> usize {
        self.latest_count.min(self.episodes.len())
    }
}

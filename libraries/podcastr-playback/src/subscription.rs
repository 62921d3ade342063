//! Snapshot subscriptions
//!
//! Every surface that renders player state registers a callback here. The
//! session calls each one, in registration order, once per completed
//! transition. Callbacks only ever see a finished snapshot.

use crate::types::SessionSnapshot;

/// Handle returned by [`Subscribers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&SessionSnapshot)>;

/// Ordered list of snapshot callbacks
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn subscribe(&mut self, callback: impl FnMut(&SessionSnapshot) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Call every callback with `snapshot`
    pub fn notify(&mut self, snapshot: &SessionSnapshot) {
        for (_, callback) in &mut self.callbacks {
            callback(snapshot);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

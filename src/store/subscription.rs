//! Subscription handles.

use crate::store::{AtomKey, Store};
use std::fmt;

/// Keeps an atom mounted while alive.
///
/// Dropping the handle removes the listener; dropping the last handle for an
/// atom runs its teardown. The handle keeps its store alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Store,
    key: AtomKey,
    id: u64,
    sources: Vec<AtomKey>,
    active: bool,
}

impl Subscription {
    pub(crate) fn new(store: Store, key: AtomKey, id: u64, sources: Vec<AtomKey>) -> Self {
        Self {
            store,
            key,
            id,
            sources,
            active: true,
        }
    }

    /// Key of the subscribed atom.
    pub fn key(&self) -> AtomKey {
        self.key
    }

    /// Unsubscribe now. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.store.unsubscribe(self.key, self.id, &self.sources);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

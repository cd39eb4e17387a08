//! Observer registration for [`PassThroughStore`](super::PassThroughStore).

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

pub(crate) type Callback<S> = Arc<dyn Fn(&S, u64) + Send + Sync>;

pub(crate) struct Subscriber<S> {
    pub(crate) id: u64,
    pub(crate) callback: Callback<S>,
}

/// Subscriber list shared between a store and its subscription guards.
pub(crate) struct Registry<S> {
    next_id: u64,
    pub(crate) subscribers: Vec<Subscriber<S>>,
}

impl<S> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, callback: Callback<S>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, callback });
        id
    }

    fn remove(&mut self, id: u64) {
        self.subscribers.retain(|s| s.id != id);
    }
}

/// Guard for a registered observer.
///
/// The observer stays registered until this guard is dropped or
/// [`unsubscribe`](Subscription::unsubscribe) is called. Outliving the
/// store is fine: the guard holds only a weak reference.
#[must_use = "dropping a Subscription unregisters its observer"]
pub struct Subscription<S> {
    id: u64,
    registry: Weak<Mutex<Registry<S>>>,
}

impl<S> Subscription<S> {
    pub(crate) fn new(id: u64, registry: &Arc<Mutex<Registry<S>>>) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    /// Unregister the observer now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().remove(self.id);
        }
    }
}

impl<S> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

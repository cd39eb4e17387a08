//! Pass-through state store.
//!
//! Provides thread-safe state storage whose update rule is "replace with
//! the given value". Readers never wait on reducer work, only on the short
//! critical section of a concurrent commit.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::subscription::{Callback, Registry, Subscription};
use super::StateStore;
use crate::error::StoreError;
use crate::reducer::State;

/// Thread-safe last-write-wins store with change notification.
///
/// Uses a read-write lock for the state: many concurrent readers, exclusive
/// commits. A separate commit lock serializes update plus notification so
/// observers see commits in the order they were applied.
pub struct PassThroughStore<S> {
    inner: RwLock<StoreInner<S>>,
    commit_lock: Mutex<()>,
    registry: Arc<Mutex<Registry<S>>>,
}

struct StoreInner<S> {
    /// The most recently committed state.
    state: S,
    /// Number of successful commits.
    version: u64,
    /// Set once the owning context is torn down.
    closed: bool,
}

impl<S: State> PassThroughStore<S> {
    /// Create a store seeded with `initial` verbatim.
    pub fn new(initial: S) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                state: initial,
                version: 0,
                closed: false,
            }),
            commit_lock: Mutex::new(()),
            registry: Arc::new(Mutex::new(Registry::new())),
        }
    }

    /// Create a store seeded with `init(init_arg)`.
    ///
    /// `init` runs exactly once, before the store exists.
    pub fn with_init<T, F>(init_arg: T, init: F) -> Self
    where
        F: FnOnce(T) -> S,
    {
        Self::new(init(init_arg))
    }

    /// Register an observer called after every successful commit with the
    /// committed state and the new version.
    ///
    /// Observers run on the committing task while the commit lock is held,
    /// so they must not commit to this store themselves. They may subscribe
    /// or drop subscriptions; such changes take effect from the next commit.
    /// A panicking observer is logged and does not fail the commit.
    pub fn subscribe<F>(&self, observer: F) -> Subscription<S>
    where
        F: Fn(&S, u64) + Send + Sync + 'static,
    {
        let callback: Callback<S> = Arc::new(observer);
        let id = self.registry.lock().insert(callback);
        Subscription::new(id, &self.registry)
    }

    /// Number of currently registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().subscribers.len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.read().closed
    }

    /// Number of successful commits so far.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    /// Stop accepting commits.
    ///
    /// Dispatches still in flight resolve as usual but their commits are
    /// rejected with [`StoreError::Closed`]. The last committed state stays
    /// readable.
    pub fn close(&self) {
        let mut inner = self.inner.write();
        if !inner.closed {
            inner.closed = true;
            tracing::info!(version = inner.version, "State store closed");
        }
    }
}

impl<S: State> StateStore<S> for PassThroughStore<S> {
    fn read(&self) -> S {
        self.inner.read().state.clone()
    }

    fn commit(&self, state: S) -> Result<u64, StoreError> {
        let _commit = self.commit_lock.lock();

        let version = {
            let mut inner = self.inner.write();
            if inner.closed {
                return Err(StoreError::Closed);
            }
            inner.version += 1;
            inner.state = state;
            inner.version
        };

        let callbacks: Vec<Callback<S>> = self
            .registry
            .lock()
            .subscribers
            .iter()
            .map(|s| Arc::clone(&s.callback))
            .collect();

        if !callbacks.is_empty() {
            let committed = self.read();
            for callback in callbacks {
                // The state is already replaced; a panicking observer is logged
                // and the remaining observers still run.
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| callback(&committed, version)));
                if let Err(payload) = outcome {
                    tracing::warn!(
                        version,
                        panic = panic_message(payload.as_ref()),
                        "State observer panicked"
                    );
                }
            }
        }

        Ok(version)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

impl<S: State + std::fmt::Debug> std::fmt::Debug for PassThroughStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("PassThroughStore")
            .field("state", &inner.state)
            .field("version", &inner.version)
            .field("closed", &inner.closed)
            .finish()
    }
}

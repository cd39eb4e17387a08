//! Synchronous state storage backing an async reducer cell.
//!
//! The cell needs exactly two operations from its store: read the current
//! state and commit a replacement. Observers register on the concrete
//! store, not on the cell.

mod pass_through;
mod subscription;

pub use pass_through::PassThroughStore;
pub use subscription::Subscription;

use crate::error::StoreError;

/// Last-write-wins state container.
///
/// Implementations must make each `commit` atomic with respect to
/// concurrent reads and to their own change notification.
pub trait StateStore<S>: Send + Sync + 'static {
    /// Clone of the most recently committed state.
    fn read(&self) -> S;

    /// Replace the current state with `state` and return the store's
    /// version after this commit.
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] if the store no longer accepts
    /// commits. State is unchanged on error.
    fn commit(&self, state: S) -> Result<u64, StoreError>;
}

//! Error types for dispatch and commit.

use thiserror::Error;
use tokio::task::JoinError;

/// Errors returned by a [`StateStore`](crate::store::StateStore) commit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store was closed and no longer accepts commits.
    #[error("state store is closed")]
    Closed,
}

/// Errors observed by whoever awaits a dispatch.
///
/// None of these variants leave a partial state behind: when a dispatch
/// fails, the committed state is whatever it was before the failure.
#[derive(Debug, Error)]
pub enum DispatchError<E>
where
    E: std::error::Error + 'static,
{
    /// The async reducer itself failed. Nothing was committed.
    #[error("async reducer failed: {0}")]
    Reducer(#[source] E),

    /// The reducer resolved but the store refused the commit.
    #[error("commit rejected: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The dispatch task panicked or was cancelled by runtime shutdown.
    #[error("dispatch task aborted: {0}")]
    Aborted(#[source] JoinError),
}

impl<E> DispatchError<E>
where
    E: std::error::Error + 'static,
{
    /// Short identifier for log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            DispatchError::Reducer(_) => "reducer_failure",
            DispatchError::StoreUnavailable(_) => "store_unavailable",
            DispatchError::Aborted(_) => "aborted",
        }
    }

    pub fn is_reducer_failure(&self) -> bool {
        matches!(self, DispatchError::Reducer(_))
    }

    /// The reducer's own error, if that is what failed.
    pub fn into_reducer_error(self) -> Option<E> {
        match self {
            DispatchError::Reducer(err) => Some(err),
            _ => None,
        }
    }
}

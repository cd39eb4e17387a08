//! The async reducer cell.
//!
//! A cell pairs a [`StateStore`] with an [`AsyncReducer`]. Dispatching an
//! action reads the committed state, starts the reducer, and commits
//! whatever the reducer resolves to.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::error::DispatchError;
use crate::reducer::{Action, AsyncReducer, State};
use crate::store::{PassThroughStore, StateStore};

/// Result of one dispatch: the committed state, or why nothing was committed.
pub type DispatchResult<S, E> = Result<S, DispatchError<E>>;

/// Asynchronous state-reduction unit.
///
/// Cloning is cheap and every clone shares the same store, reducer and
/// dispatch sequence.
///
/// # Ordering
///
/// Dispatches are neither queued nor serialized. Each one reads the state
/// committed at the moment it is issued, and commits land in the order the
/// reducer futures *resolve*. A slow dispatch issued first overwrites a
/// fast one issued after it. Callers that need issue-order semantics must
/// sequence dispatches themselves.
pub struct AsyncReducerCell<S, A, R, St = PassThroughStore<S>> {
    reducer: Arc<R>,
    store: Arc<St>,
    sequence: Arc<AtomicU64>,
    _marker: PhantomData<fn(A) -> S>,
}

impl<S, A, R> AsyncReducerCell<S, A, R, PassThroughStore<S>>
where
    S: State,
    A: Action,
    R: AsyncReducer<S, A>,
{
    /// Create a cell whose initial state is `initial_state` verbatim.
    pub fn new(reducer: R, initial_state: S) -> Self {
        Self::from_store(reducer, Arc::new(PassThroughStore::new(initial_state)))
    }

    /// Create a cell whose initial state is `init(init_arg)`.
    ///
    /// `init` runs eagerly, exactly once. With an identity `init` this is
    /// equivalent to [`new`](Self::new).
    pub fn with_init<T, F>(reducer: R, init_arg: T, init: F) -> Self
    where
        F: FnOnce(T) -> S,
    {
        Self::from_store(
            reducer,
            Arc::new(PassThroughStore::with_init(init_arg, init)),
        )
    }
}

impl<S, A, R, St> AsyncReducerCell<S, A, R, St>
where
    S: State,
    A: Action,
    R: AsyncReducer<S, A>,
    St: StateStore<S>,
{
    /// Create a cell on top of a store supplied by the host.
    pub fn from_store(reducer: R, store: Arc<St>) -> Self {
        Self {
            reducer: Arc::new(reducer),
            store,
            sequence: Arc::new(AtomicU64::new(0)),
            _marker: PhantomData,
        }
    }

    /// The most recently committed state.
    pub fn state(&self) -> S {
        self.store.read()
    }

    /// The backing store, for subscriptions and inspection.
    pub fn store(&self) -> &Arc<St> {
        &self.store
    }

    /// Number of dispatches issued through this cell and its clones.
    pub fn dispatched(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Dispatch `action` on the Tokio runtime and return immediately.
    ///
    /// The current state is read and the reducer is invoked before this
    /// returns; only the wait for the reducer's result and the commit run
    /// on the spawned task. Dropping the returned handle does not cancel
    /// the dispatch.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch(&self, action: A) -> DispatchHandle<S, R::Error> {
        let cycle = self.apply(action);
        DispatchHandle {
            task: tokio::spawn(cycle),
        }
    }

    /// Run one dispatch cycle on the caller's task.
    ///
    /// Like [`dispatch`](Self::dispatch), the state is read and the
    /// reducer started when this is called, not when the returned future
    /// is first polled.
    pub fn apply(
        &self,
        action: A,
    ) -> impl Future<Output = DispatchResult<S, R::Error>> + Send + 'static {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let span = tracing::debug_span!("dispatch", seq);

        let pending = span.in_scope(|| {
            let read = self.store.read();
            tracing::debug!("Dispatch issued");
            self.reducer.reduce(read, action)
        });
        let store = Arc::clone(&self.store);

        async move {
            let next = match pending.await {
                Ok(next) => next,
                Err(err) => {
                    tracing::warn!(
                        error_type = "reducer_failure",
                        error = %err,
                        "Async reducer failed, state left unchanged"
                    );
                    return Err(DispatchError::Reducer(err));
                }
            };

            match store.commit(next.clone()) {
                Ok(version) => {
                    tracing::debug!(version, "Committed");
                    Ok(next)
                }
                Err(err) => {
                    tracing::debug!(error = %err, "Commit rejected by store");
                    Err(err.into())
                }
            }
        }
        .instrument(span)
    }
}

impl<S, A, R, St> Clone for AsyncReducerCell<S, A, R, St> {
    fn clone(&self) -> Self {
        Self {
            reducer: Arc::clone(&self.reducer),
            store: Arc::clone(&self.store),
            sequence: Arc::clone(&self.sequence),
            _marker: PhantomData,
        }
    }
}

/// Completion handle for a spawned dispatch.
///
/// Awaiting yields the committed state. Dropping detaches.
#[must_use = "drop the handle explicitly for fire-and-forget dispatch"]
pub struct DispatchHandle<S, E>
where
    E: std::error::Error + 'static,
{
    task: JoinHandle<DispatchResult<S, E>>,
}

impl<S, E> DispatchHandle<S, E>
where
    E: std::error::Error + 'static,
{
    /// Whether the dispatch has resolved (committed or failed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<S, E> Future for DispatchHandle<S, E>
where
    E: std::error::Error + 'static,
{
    type Output = DispatchResult<S, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.task).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(join_err) => Err(DispatchError::Aborted(join_err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn test_apply_commits_reducer_result() {
        let cell = AsyncReducerCell::new(
            |state: Vec<u8>, byte: u8| async move {
                let mut next = state;
                next.push(byte);
                Ok::<_, Infallible>(next)
            },
            Vec::new(),
        );

        let committed = cell.apply(1).await.unwrap();
        assert_eq!(committed, vec![1]);
        assert_eq!(cell.state(), vec![1]);
    }

    #[tokio::test]
    async fn test_apply_reads_state_eagerly() {
        let cell = AsyncReducerCell::new(
            |state: u32, add: u32| async move { Ok::<_, Infallible>(state + add) },
            1,
        );

        // Started against 1, polled after another commit.
        let first = cell.apply(10);
        cell.apply(100).await.unwrap();
        assert_eq!(cell.state(), 101);

        first.await.unwrap();
        assert_eq!(cell.state(), 11);
    }

    #[tokio::test]
    async fn test_dispatch_counts_sequence_across_clones() {
        let cell = AsyncReducerCell::new(
            |state: u32, _: ()| async move { Ok::<_, Infallible>(state + 1) },
            0,
        );
        let other = cell.clone();

        cell.dispatch(()).await.unwrap();
        other.dispatch(()).await.unwrap();

        assert_eq!(cell.dispatched(), 2);
        assert_eq!(other.state(), 2);
    }

    #[tokio::test]
    async fn test_closed_store_rejects_pending_commit() {
        let (tx, rx) = tokio::sync::oneshot::channel::<u32>();
        let rx = Arc::new(parking_lot::Mutex::new(Some(rx)));
        let cell = AsyncReducerCell::new(
            move |_: u32, _: ()| {
                let rx = rx.lock().take();
                async move {
                    match rx {
                        Some(rx) => Ok(rx.await.unwrap_or_default()),
                        None => Ok::<_, Infallible>(0),
                    }
                }
            },
            5,
        );

        let handle = cell.dispatch(());
        cell.store().close();
        tx.send(9).unwrap();

        let err = handle.await.unwrap_err();
        assert_eq!(err.error_type(), "store_unavailable");
        assert_eq!(cell.state(), 5);
    }
}

//! AsyncReducer trait.

use std::future::Future;

use super::action::Action;
use super::state::State;

/// Reducer whose state transition completes asynchronously.
///
/// `reduce` is called synchronously at dispatch time with the state
/// committed at that instant. Whatever the returned future resolves to
/// becomes the next state verbatim; the cell performs no merging.
///
/// Any `Fn(S, A) -> Future<Output = Result<S, E>>` closure is an
/// `AsyncReducer`:
///
/// ```
/// use async_reducer_cell::reducer::AsyncReducer;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("never")]
/// struct Never;
///
/// fn assert_reducer<R: AsyncReducer<u32, u32>>(_: &R) {}
///
/// let add = |state: u32, action: u32| async move { Ok::<_, Never>(state + action) };
/// assert_reducer(&add);
/// ```
pub trait AsyncReducer<S: State, A: Action>: Send + Sync + 'static {
    /// Failure produced by the computation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The suspended computation returned by [`reduce`](Self::reduce).
    type Future: Future<Output = Result<S, Self::Error>> + Send + 'static;

    /// Start computing the next state from `state` and `action`.
    fn reduce(&self, state: S, action: A) -> Self::Future;
}

impl<S, A, E, F, Fut> AsyncReducer<S, A> for F
where
    S: State,
    A: Action,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(S, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<S, E>> + Send + 'static,
{
    type Error = E;
    type Future = Fut;

    fn reduce(&self, state: S, action: A) -> Self::Future {
        self(state, action)
    }
}

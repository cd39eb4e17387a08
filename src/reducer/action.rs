//! Base trait for actions dispatched to an async reducer.

/// Marker trait for action objects.
///
/// Actions represent:
/// - Caller requests (increment, load, refresh)
/// - External events (responses, timers)
///
/// The cell never inspects an action; it is handed to the reducer as-is.
pub trait Action: Send + 'static {}

impl<T: Send + 'static> Action for T {}

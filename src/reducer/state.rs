//! Base trait for reducer state.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable by convention (Clone to create new states)
/// - Shareable across tasks (the store hands out clones to readers)
pub trait State: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> State for T {}

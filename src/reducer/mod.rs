//! Asynchronous reducer primitives.
//!
//! This module provides the base traits for unidirectional state flow
//! where computing the next state may suspend.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ AsyncReducer ──(await)──→ State ──→ Store ──→ Subscribers
//!                  ↑                                │
//!                  └────────── read() ──────────────┘
//! ```
//!
//! - **State**: Opaque value owned by the store
//! - **Action**: Caller-defined input describing an intended change
//! - **AsyncReducer**: `(State, Action) -> Future<Result<State, E>>`

mod action;
mod async_reducer;
mod state;

pub use action::Action;
pub use async_reducer::AsyncReducer;
pub use state::State;

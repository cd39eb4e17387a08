//! Asynchronous state reduction.
//!
//! An [`AsyncReducerCell`] generalizes the synchronous
//! `(state, action) -> state` reducer to transitions that must await
//! something before the next state is known. Dispatch returns immediately;
//! the reducer's resolved value is committed to a [`StateStore`] as-is.
//!
//! ```
//! use async_reducer_cell::AsyncReducerCell;
//! use std::convert::Infallible;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cell = AsyncReducerCell::new(
//!     |count: u64, add: u64| async move { Ok::<_, Infallible>(count + add) },
//!     0,
//! );
//! cell.dispatch(2).await.unwrap();
//! assert_eq!(cell.state(), 2);
//! # }
//! ```

pub mod cell;
pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod store;

pub use cell::{AsyncReducerCell, DispatchHandle, DispatchResult};
pub use error::{DispatchError, StoreError};
pub use reducer::{Action, AsyncReducer, State};
pub use store::{PassThroughStore, StateStore, Subscription};

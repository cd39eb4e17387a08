//! Shared test utilities: a reducer whose dispatches resolve only when the
//! test opens their gate.

#![allow(dead_code, unused_imports)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_reducer_cell::{AsyncReducer, AsyncReducerCell};
use parking_lot::Mutex;
use tokio::sync::oneshot;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
    #[error("gate dropped before opening")]
    GateDropped,
    #[error("refused to add {0}")]
    Refused(i64),
}

/// Action that resolves to `state + add` once its gate is opened.
pub struct Gated {
    pub add: i64,
    pub fail: bool,
    release: oneshot::Receiver<()>,
}

/// Test-side half of a [`Gated`] action.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

pub fn gated(add: i64) -> (Gated, Gate) {
    let (tx, rx) = oneshot::channel();
    (
        Gated {
            add,
            fail: false,
            release: rx,
        },
        Gate(tx),
    )
}

pub fn gated_failure(add: i64) -> (Gated, Gate) {
    let (mut action, gate) = gated(add);
    action.fail = true;
    (action, gate)
}

/// Reducer that records every state it was handed.
#[derive(Clone, Default)]
pub struct GatedAdder {
    pub reads: Arc<Mutex<Vec<i64>>>,
}

impl GatedAdder {
    pub fn reads(&self) -> Vec<i64> {
        self.reads.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.reads.lock().len()
    }
}

impl AsyncReducer<i64, Gated> for GatedAdder {
    type Error = TestError;
    type Future = Pin<Box<dyn Future<Output = Result<i64, TestError>> + Send>>;

    fn reduce(&self, state: i64, action: Gated) -> Self::Future {
        self.reads.lock().push(state);
        Box::pin(async move {
            action
                .release
                .await
                .map_err(|_| TestError::GateDropped)?;
            if action.fail {
                return Err(TestError::Refused(action.add));
            }
            Ok(state + action.add)
        })
    }
}

pub type GatedCell = AsyncReducerCell<i64, Gated, GatedAdder>;

/// A cell starting at `initial`, plus a handle on its reducer's read log.
pub fn gated_cell(initial: i64) -> (GatedCell, GatedAdder) {
    let adder = GatedAdder::default();
    (AsyncReducerCell::new(adder.clone(), initial), adder)
}

//! Counter scenario used by the `reducer-demo` binary.
//!
//! The reducer sleeps in proportion to the delta it applies, so a large
//! delta dispatched first resolves after a small one dispatched second.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config::DemoConfig;
use crate::reducer::AsyncReducer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub delta: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdderError {
    #[error("negative delta {0} rejected")]
    NegativeDelta(i64),
}

/// Adds `delta` to the counter after `|delta| * delay_per_unit`.
#[derive(Debug, Clone)]
pub struct DelayedAdder {
    delay_per_unit: Duration,
    reject_negative: bool,
}

impl DelayedAdder {
    pub fn new(delay_per_unit: Duration, reject_negative: bool) -> Self {
        Self {
            delay_per_unit,
            reject_negative,
        }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(
            Duration::from_millis(config.delay_per_unit_ms),
            config.reject_negative,
        )
    }

    fn delay_for(&self, delta: i64) -> Duration {
        let units = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        self.delay_per_unit.saturating_mul(units)
    }
}

impl AsyncReducer<Counter, Delta> for DelayedAdder {
    type Error = AdderError;
    type Future = Pin<Box<dyn Future<Output = Result<Counter, AdderError>> + Send>>;

    fn reduce(&self, state: Counter, action: Delta) -> Self::Future {
        let delay = self.delay_for(action.delta);
        let reject = self.reject_negative && action.delta < 0;

        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if reject {
                return Err(AdderError::NegativeDelta(action.delta));
            }
            Ok(Counter {
                count: state.count.saturating_add(action.delta),
            })
        })
    }
}

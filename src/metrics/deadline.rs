//! Per-scrape deadline around upstream API calls.

use crate::error::{ExporterError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::error;

/// A deadline created fresh for each collection pass.
///
/// Calls made through the same `Deadline` share its budget. A call still
/// pending when the deadline passes is dropped, which cancels the request.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    timeout: Duration,
}

impl Deadline {
    /// Start a deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now() + timeout,
            timeout,
        }
    }

    /// Await `call` until the deadline, logging any failure.
    ///
    /// Returns `None` when the call errored or timed out.
    pub async fn run<T, F>(&self, collector: &'static str, call: F) -> Option<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.try_run(call).await {
            Ok(value) => Some(value),
            Err(err) => {
                error!(collector, error = %err, "failed to collect resources");
                None
            }
        }
    }

    /// Await `call` until the deadline without logging.
    pub async fn try_run<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout_at(self.at, call).await {
            Ok(result) => result,
            Err(_) => Err(ExporterError::Timeout(self.timeout)),
        }
    }
}

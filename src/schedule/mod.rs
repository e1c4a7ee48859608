//! Sequential request queue
//!
//! Exchange REST limits are respected by running per-symbol requests one at
//! a time with a fixed pause between them.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Default pause between queued requests
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(300);

/// Runs tasks in order with a fixed delay between consecutive tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestQueue {
    delay: Duration,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_DELAY)
    }
}

impl RequestQueue {
    /// Create a queue with the given inter-task delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Delay between consecutive tasks
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `f` on each task in order and collect the outputs
    ///
    /// Sleeps between tasks, never before the first or after the last.
    /// Outputs (including errors) come back in input order; one failing task
    /// does not stop the rest.
    pub async fn run<T, O, F, Fut>(&self, tasks: impl IntoIterator<Item = T>, mut f: F) -> Vec<O>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = O>,
    {
        let mut outputs = Vec::new();

        for (index, task) in tasks.into_iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
            tracing::trace!(index, "Running queued request");
            outputs.push(f(task).await);
        }

        outputs
    }
}

//! Cancellable delayed-task scheduling
//!
//! The compare-city input fires a fetch only after typing has paused.
//! [`Debouncer::schedule`] runs a future after a fixed delay; scheduling
//! again under the same key aborts the previously scheduled, unexecuted
//! task, so only the most recent one survives.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

/// Keyed debouncer over tokio tasks
pub struct Debouncer {
    delay: Duration,
    pending: HashMap<String, JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given delay
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Schedule `task` to run after the delay, cancelling any pending task
    /// under the same key.
    pub fn schedule<F>(&mut self, key: &str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        });

        if let Some(previous) = self.pending.insert(key.to_string(), handle) {
            trace!("Cancelling pending debounced task for key '{}'", key);
            previous.abort();
        }
    }

    /// Cancel the pending task for a key, if any
    pub fn cancel(&mut self, key: &str) {
        if let Some(handle) = self.pending.remove(key) {
            handle.abort();
        }
    }

    /// Cancel everything still pending
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

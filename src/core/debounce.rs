//! Cancellable deferred work
//!
//! A [`Debouncer`] runs a closure once its delay has elapsed without a newer
//! call to [`schedule`](Debouncer::schedule). Each call resets the timer, so
//! only the last input of a burst does any work.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Timer handle that is reset by every new input
///
/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the delay unless another call comes first
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Ticket and handle change together so the newest task is never aborted
        let mut pending = self.lock_pending();
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer schedule or a cancel may have raced the abort
            if generation.load(Ordering::SeqCst) == ticket {
                task();
            }
        });

        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop pending work; returns whether anything was pending
    pub fn cancel(&self) -> bool {
        let mut pending = self.lock_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        match pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // The guarded value is a plain handle, a poisoned lock leaves it usable
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

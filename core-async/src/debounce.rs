//! Cancel-and-reschedule delayed actions.
//!
//! A [`Debouncer`] holds at most one pending action. Scheduling a new action
//! cancels the previous one before the new delay starts, so only the most
//! recently scheduled action can ever run. Dropping the debouncer cancels
//! whatever is still pending.
//!
//! # Examples
//!
//! ```rust
//! use core_async::{Debouncer, Duration};
//!
//! # async fn example() {
//! let mut debouncer = Debouncer::new(Duration::from_millis(500));
//! debouncer.schedule(async { println!("first") });
//! // Supersedes "first" before it fires.
//! debouncer.schedule(async { println!("second") });
//! # }
//! ```

use crate::sync::CancellationToken;
use crate::task::{self, JoinHandle};
use crate::time::{sleep, Duration};
use std::fmt;
use std::future::Future;
use tracing::trace;

struct Pending {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Single-slot delayed task with cancel-on-reschedule semantics.
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    /// Create a debouncer that waits `delay` of quiet time before running.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period applied to every scheduled action.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending action and schedule `action` after the quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let delay = self.delay;

        let handle = task::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    trace!("Debounced action cancelled before firing");
                }
                _ = sleep(delay) => {
                    tokio::select! {
                        biased;
                        _ = cancelled.cancelled() => {}
                        _ = action => {}
                    }
                }
            }
        });

        self.pending = Some(Pending { token, handle });
    }

    /// Cancel the pending action, if any.
    ///
    /// Returns `true` when an action was still waiting or running.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                let was_live = !pending.handle.is_finished();
                pending.token.cancel();
                was_live
            }
            None => false,
        }
    }

    /// Whether an action is scheduled and has not completed yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

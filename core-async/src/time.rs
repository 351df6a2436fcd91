//! Time-related abstractions.
//!
//! Sleeps and timeouts integrate with tokio's timer wheel, which means tests
//! can drive them deterministically with `#[tokio::test(start_paused = true)]`.

pub use tokio::time::{interval, sleep, sleep_until, timeout, Interval, Sleep, Timeout};

pub use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Error returned by [`timeout`] when the deadline elapses first.
pub use tokio::time::error::Elapsed;

/// Milliseconds elapsed since `start`, saturated into a `u64`.
pub fn elapsed_millis(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

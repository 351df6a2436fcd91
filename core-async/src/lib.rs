//! Async abstraction layer for the video feed core.
//!
//! All core-* and provider-* crates depend on this crate instead of reaching
//! for tokio directly, so the runtime choice lives in one place.
//!
//! # Modules
//!
//! - `task`: Task spawning and execution
//! - `time`: Time-related operations (sleep, timeout, instant)
//! - `sync`: Synchronization primitives (Mutex, channels, cancellation)
//! - `runtime`: Runtime handles and `block_on`
//! - `debounce`: Cancel-and-reschedule delayed actions
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

pub mod debounce;
pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

// Re-export commonly used types at crate root for convenience
pub use debounce::Debouncer;
pub use task::spawn;
pub use time::{sleep, Duration, Instant};

/// Re-export of `tokio::select!` so callers do not need a direct tokio dependency.
pub use tokio::select;

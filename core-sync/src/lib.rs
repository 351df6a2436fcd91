//! # Feed Synchronization
//!
//! Pulls the remote video feed and persists it into the local cache.
//!
//! ## Components
//!
//! - **Feed Synchronizer** (`synchronizer`): one fetch-map-write pass under a timeout
//! - **Job** (`job`): refresh identity and outcome, correlated through `SyncEvent`s
//!
//! Connectivity gating is left to the caller; the synchronizer always tries.

pub mod error;
pub mod job;
pub mod synchronizer;

pub use error::{Result, SyncError};
pub use job::{SyncJobId, SyncOutcome};
pub use synchronizer::{FeedSynchronizer, DEFAULT_REFRESH_TIMEOUT};

//! Identity and result of a single refresh run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for a refresh run, used to correlate its events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncJobId(Uuid);

impl SyncJobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SyncJobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SyncJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a successful refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub job_id: SyncJobId,
    /// Videos returned by the remote feed
    pub fetched: usize,
    /// Rows written to the cache (zero when the feed was empty)
    pub written: usize,
    pub duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl SyncOutcome {
    /// The feed answered but had nothing in it.
    pub fn is_empty(&self) -> bool {
        self.fetched == 0
    }
}

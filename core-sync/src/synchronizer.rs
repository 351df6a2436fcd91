//! Feed synchronizer
//!
//! A refresh is one pass: fetch the whole remote feed under a timeout, map
//! it to cache rows and upsert them in a single transaction. Nothing is
//! deleted, so videos that vanished upstream stay cached until
//! [`FeedSynchronizer::clear_cache`] is called.

use crate::error::{Result, SyncError};
use crate::job::{SyncJobId, SyncOutcome};
use bridge_traits::feed::RemoteFeedClient;
use bridge_traits::time::{Clock, SystemClock};
use core_async::time::{elapsed_millis, timeout, Duration, Instant};
use core_library::{Video, VideoRepository};
use core_runtime::events::{CoreEvent, EventBus, SyncEvent};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(30);

/// Orchestrates remote feed refreshes into the local cache.
pub struct FeedSynchronizer {
    remote: Arc<dyn RemoteFeedClient>,
    repository: Arc<dyn VideoRepository>,
    event_bus: EventBus,
    clock: Arc<dyn Clock>,
    refresh_timeout: Duration,
}

impl FeedSynchronizer {
    pub fn new(
        remote: Arc<dyn RemoteFeedClient>,
        repository: Arc<dyn VideoRepository>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            remote,
            repository,
            event_bus,
            clock: Arc::new(SystemClock),
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, refresh_timeout: Duration) -> Self {
        self.refresh_timeout = refresh_timeout;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn refresh_timeout(&self) -> Duration {
        self.refresh_timeout
    }

    /// Fetch the remote feed and upsert it into the cache.
    ///
    /// An empty feed succeeds with `written == 0` and leaves the cache as is.
    pub async fn refresh(&self) -> Result<SyncOutcome> {
        let job_id = SyncJobId::new();
        self.event_bus
            .emit(CoreEvent::Sync(SyncEvent::Started {
                job_id: job_id.to_string(),
            }))
            .ok();

        let started = Instant::now();
        let result = self.run(job_id, started).await;

        let event = match &result {
            Ok(outcome) => SyncEvent::Completed {
                job_id: job_id.to_string(),
                fetched: outcome.fetched as u64,
                written: outcome.written as u64,
                duration_ms: outcome.duration.as_millis() as u64,
            },
            Err(e) => SyncEvent::Failed {
                job_id: job_id.to_string(),
                message: e.to_string(),
                recoverable: e.is_recoverable(),
            },
        };
        self.event_bus.emit(CoreEvent::Sync(event)).ok();

        result
    }

    #[instrument(skip(self, started), fields(job_id = %job_id))]
    async fn run(&self, job_id: SyncJobId, started: Instant) -> Result<SyncOutcome> {
        let remote = match timeout(self.refresh_timeout, self.remote.fetch_all()).await {
            Ok(Ok(videos)) => videos,
            Ok(Err(e)) => {
                warn!(error = %e, "Remote feed fetch failed");
                return Err(SyncError::from(e));
            }
            Err(_) => {
                warn!(timeout = ?self.refresh_timeout, "Remote feed fetch timed out");
                return Err(SyncError::Timeout(self.refresh_timeout));
            }
        };

        let fetched = remote.len();
        let videos: Vec<Video> = remote.into_iter().map(Video::from).collect();
        let written = self.repository.insert_or_replace_all(&videos).await?;

        info!(
            fetched,
            written,
            duration_ms = elapsed_millis(started),
            "Feed refresh completed"
        );

        Ok(SyncOutcome {
            job_id,
            fetched,
            written,
            duration: started.elapsed(),
            completed_at: self.clock.now(),
        })
    }

    /// Drop every cached video.
    pub async fn clear_cache(&self) -> Result<u64> {
        let removed = self.repository.clear_all().await?;
        info!(removed, "Video cache cleared");
        Ok(removed)
    }
}

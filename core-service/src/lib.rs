//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP, connectivity,
//! playback engine) into the shared Rust core and hands out per-screen
//! controllers. Desktop apps typically enable the `desktop-shims` feature so
//! that missing HTTP and connectivity bridges fall back to `bridge-desktop`.
//!
//! ```ignore
//! let config = CoreConfig::builder()
//!     .database_path("/data/videos.db")
//!     .build()?;
//! let core = CoreService::bootstrap(config).await?;
//!
//! let home = core.home_screen();
//! let player = core.player_screen("42", engine);
//! ```

pub mod error;

pub use error::{CoreError, Result};

use std::sync::Arc;

use bridge_traits::network::NetworkMonitor;
use bridge_traits::playback::PlaybackEngine;
use core_feed::{FeedDependencies, FeedReconciler};
use core_library::db::{create_pool, DatabaseConfig};
use core_library::{SqliteVideoRepository, VideoRepository};
use core_playback::PlaybackSessionController;
use core_runtime::config::{CoreConfig, FeedSettings};
use core_runtime::events::EventBus;
use core_sync::FeedSynchronizer;
use provider_feed::FeedConnector;
use tracing::{debug, info, instrument};

const EVENT_BUS_CAPACITY: usize = 256;

/// Long-lived collaborators shared by every screen.
struct CoreDependencies {
    repository: Arc<dyn VideoRepository>,
    synchronizer: Arc<FeedSynchronizer>,
    network_monitor: Arc<dyn NetworkMonitor>,
    event_bus: EventBus,
    settings: FeedSettings,
}

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    deps: Arc<CoreDependencies>,
}

impl CoreService {
    /// Open the cache and build the feed pipeline described by `config`.
    #[instrument(skip_all, fields(database = %config.database_path.display()))]
    pub async fn bootstrap(config: CoreConfig) -> Result<Self> {
        let database = if config.is_in_memory() {
            DatabaseConfig::in_memory()
        } else {
            DatabaseConfig::new(config.database_path.clone())
        };
        let pool = create_pool(database).await?;
        let repository: Arc<dyn VideoRepository> = Arc::new(SqliteVideoRepository::new(pool));

        let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
        let connector = FeedConnector::new(config.http_client.clone(), config.feed_url.clone())
            .with_request_timeout(config.feed.refresh_timeout);
        let synchronizer = FeedSynchronizer::new(
            Arc::new(connector),
            Arc::clone(&repository),
            event_bus.clone(),
        )
        .with_timeout(config.feed.refresh_timeout)
        .with_clock(config.clock.clone());

        info!(feed_url = %config.feed_url, "Core service ready");

        Ok(Self {
            deps: Arc::new(CoreDependencies {
                repository,
                synchronizer: Arc::new(synchronizer),
                network_monitor: config.network_monitor.clone(),
                event_bus,
                settings: config.feed,
            }),
        })
    }

    /// Start a reconciler for the home screen.
    ///
    /// Must be called from within a tokio runtime. The reconciler stops when
    /// it is dropped.
    pub fn home_screen(&self) -> FeedReconciler {
        debug!("Opening home screen");
        FeedReconciler::spawn(FeedDependencies {
            repository: Arc::clone(&self.deps.repository),
            synchronizer: Arc::clone(&self.deps.synchronizer),
            network_monitor: Arc::clone(&self.deps.network_monitor),
            event_bus: self.deps.event_bus.clone(),
            settings: self.deps.settings,
        })
    }

    /// Open a playback session for `video_id` on `engine` and start resolving
    /// it in the background.
    ///
    /// The session is released when the last handle is dropped.
    pub fn player_screen(
        &self,
        video_id: impl Into<String>,
        engine: Arc<dyn PlaybackEngine>,
    ) -> Arc<PlaybackSessionController> {
        let session = Arc::new(PlaybackSessionController::new(
            video_id,
            Arc::clone(&self.deps.repository),
            engine,
            self.deps.event_bus.clone(),
        ));
        debug!(video_id = %session.video_id(), "Opening player screen");

        let loading = Arc::clone(&session);
        core_async::spawn(async move { loading.load().await });

        session
    }

    pub fn repository(&self) -> Arc<dyn VideoRepository> {
        Arc::clone(&self.deps.repository)
    }

    pub fn synchronizer(&self) -> Arc<FeedSynchronizer> {
        Arc::clone(&self.deps.synchronizer)
    }

    /// Diagnostics bus carrying sync, feed and playback events.
    pub fn events(&self) -> EventBus {
        self.deps.event_bus.clone()
    }
}

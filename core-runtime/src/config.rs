//! # Core Configuration Module
//!
//! Provides configuration management for the video feed core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the host bridges and tuning knobs the core needs. It
//! enforces fail-fast validation so a missing capability is reported at
//! startup rather than on the first refresh.
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - Remote feed download (desktop default: reqwest)
//! - `NetworkMonitor` - Connectivity signal (desktop default: TCP probe)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults are
//! injected automatically if not provided. Mobile hosts must inject their own.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, FeedSettings};
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .database_path("/data/user/0/app/databases/videos.db")
//!     .http_client(Arc::new(MyHttpClient))
//!     .network_monitor(Arc::new(MyNetworkMonitor))
//!     .feed_settings(FeedSettings::default())
//!     .build()?;
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::CoreConfig;
//!
//! // Missing database path is rejected with an actionable message
//! let config = CoreConfig::builder()
//!     .build()
//!     .expect("Should fail - no database path");
//! ```

use crate::error::{Error, Result};
use bridge_traits::{Clock, HttpClient, NetworkMonitor, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Public JSON feed the app ships with.
pub const DEFAULT_FEED_URL: &str =
    "https://gist.githubusercontent.com/poudyalanil/ca84582cbeb4fc123a13290a586da925/raw/videos.json";

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

const MAX_SEARCH_DEBOUNCE: Duration = Duration::from_secs(10);
const MAX_REFRESH_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_CAROUSEL_SIZE: usize = 50;

/// Home feed tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    /// Quiet period before a search query is applied.
    pub search_debounce: Duration,

    /// Number of videos sampled into the carousel.
    pub carousel_size: usize,

    /// Upper bound on one fetch-and-persist run.
    pub refresh_timeout: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(500),
            carousel_size: 4,
            refresh_timeout: Duration::from_secs(30),
        }
    }
}

impl FeedSettings {
    /// Validates the settings
    pub fn validate(&self) -> Result<()> {
        if self.search_debounce > MAX_SEARCH_DEBOUNCE {
            return Err(Error::Config(format!(
                "Search debounce exceeds maximum of {} ms",
                MAX_SEARCH_DEBOUNCE.as_millis()
            )));
        }

        if self.carousel_size == 0 {
            return Err(Error::Config(
                "Carousel size must be greater than 0".to_string(),
            ));
        }

        if self.carousel_size > MAX_CAROUSEL_SIZE {
            return Err(Error::Config(format!(
                "Carousel size exceeds maximum of {}",
                MAX_CAROUSEL_SIZE
            )));
        }

        if self.refresh_timeout.is_zero() {
            return Err(Error::Config(
                "Refresh timeout must be greater than 0".to_string(),
            ));
        }

        if self.refresh_timeout > MAX_REFRESH_TIMEOUT {
            return Err(Error::Config(format!(
                "Refresh timeout exceeds maximum of {} seconds",
                MAX_REFRESH_TIMEOUT.as_secs()
            )));
        }

        Ok(())
    }
}

/// Core configuration for the video feed core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Path to the SQLite cache database, or `:memory:`
    pub database_path: PathBuf,

    /// URL of the remote JSON feed
    pub feed_url: String,

    /// HTTP client used by the feed connector
    pub http_client: Arc<dyn HttpClient>,

    /// Connectivity signal for the home feed
    pub network_monitor: Arc<dyn NetworkMonitor>,

    /// Wall-clock source for sync bookkeeping
    pub clock: Arc<dyn Clock>,

    /// Home feed tuning
    pub feed: FeedSettings,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("database_path", &self.database_path)
            .field("feed_url", &self.feed_url)
            .field("http_client", &"HttpClient { ... }")
            .field("network_monitor", &"NetworkMonitor { ... }")
            .field("clock", &"Clock { ... }")
            .field("feed", &self.feed)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Whether the cache lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_DATABASE
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Database path is not empty
    /// - Feed URL is an http(s) URL
    /// - Feed settings are within bounds
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        let url = self.feed_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(Error::Config(format!(
                "Feed URL must use http or https: {}",
                self.feed_url
            )));
        }

        self.feed.validate()
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::new().map_err(|e| {
        Error::Internal(format!("Failed to initialize default HttpClient: {}", e))
    })?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(Error::capability_missing(
        "HttpClient",
        "HttpClient implementation is required to download the video feed. \
         Desktop: enable the 'desktop-shims' feature to use ReqwestHttpClient. \
         Mobile: inject the platform HTTP stack (OkHttp/URLSession).",
    ))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    use bridge_desktop::DesktopNetworkMonitor;

    Ok(Arc::new(DesktopNetworkMonitor::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_network_monitor() -> Result<Arc<dyn NetworkMonitor>> {
    Err(Error::capability_missing(
        "NetworkMonitor",
        "NetworkMonitor implementation is required for offline handling. \
         Desktop: enable the 'desktop-shims' feature to use DesktopNetworkMonitor. \
         Mobile: inject a ConnectivityManager/NWPathMonitor adapter.",
    ))
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Call [`build()`](CoreConfigBuilder::build) once all required options are
/// set. Missing bridges fall back to desktop defaults when available.
#[derive(Default)]
pub struct CoreConfigBuilder {
    database_path: Option<PathBuf>,
    feed_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    network_monitor: Option<Arc<dyn NetworkMonitor>>,
    clock: Option<Arc<dyn Clock>>,
    feed: Option<FeedSettings>,
}

impl CoreConfigBuilder {
    /// Sets the database path.
    ///
    /// ```
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder().database_path("/tmp/videos.db");
    /// ```
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Uses a private in-memory database. Handy for tests and previews.
    pub fn in_memory_database(self) -> Self {
        self.database_path(IN_MEMORY_DATABASE)
    }

    /// Sets the remote feed URL.
    ///
    /// Default: [`DEFAULT_FEED_URL`]
    pub fn feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = Some(url.into());
        self
    }

    /// Sets the HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the network monitor implementation.
    pub fn network_monitor(mut self, monitor: Arc<dyn NetworkMonitor>) -> Self {
        self.network_monitor = Some(monitor);
        self
    }

    /// Sets the clock. Default: [`SystemClock`]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets all home feed settings at once.
    pub fn feed_settings(mut self, settings: FeedSettings) -> Self {
        self.feed = Some(settings);
        self
    }

    /// Sets the search debounce period.
    pub fn search_debounce(mut self, debounce: Duration) -> Self {
        self.feed.get_or_insert_with(FeedSettings::default).search_debounce = debounce;
        self
    }

    /// Sets the refresh timeout.
    pub fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.feed.get_or_insert_with(FeedSettings::default).refresh_timeout = timeout;
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// Returns an error if:
    /// - The database path is missing
    /// - A required bridge is missing and no desktop default exists
    /// - Any value fails validation
    pub fn build(self) -> Result<CoreConfig> {
        let database_path = self.database_path.ok_or_else(|| {
            Error::Config("Database path is required. Use .database_path() to set it.".to_string())
        })?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let network_monitor = match self.network_monitor {
            Some(monitor) => monitor,
            None => provide_default_network_monitor()?,
        };

        let config = CoreConfig {
            database_path,
            feed_url: self
                .feed_url
                .unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            http_client,
            network_monitor,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            feed: self.feed.unwrap_or_default(),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::{
        BridgeError, HttpRequest, HttpResponse, NetworkChangeStream, NetworkInfo, NetworkType,
    };

    struct StubHttpClient;

    #[async_trait]
    impl HttpClient for StubHttpClient {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> std::result::Result<HttpResponse, BridgeError> {
            Err(BridgeError::NotAvailable("stub".to_string()))
        }
    }

    struct StubNetworkMonitor;

    #[async_trait]
    impl NetworkMonitor for StubNetworkMonitor {
        async fn get_network_info(&self) -> std::result::Result<NetworkInfo, BridgeError> {
            Ok(NetworkInfo::connected(NetworkType::WiFi))
        }

        async fn subscribe_changes(
            &self,
        ) -> std::result::Result<Box<dyn NetworkChangeStream>, BridgeError> {
            Err(BridgeError::NotAvailable("stub".to_string()))
        }
    }

    fn builder_with_bridges() -> CoreConfigBuilder {
        CoreConfig::builder()
            .http_client(Arc::new(StubHttpClient))
            .network_monitor(Arc::new(StubNetworkMonitor))
    }

    #[test]
    fn test_builder_requires_database_path() {
        let result = builder_with_bridges().build();

        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("Database path is required")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_http_client() {
        let result = CoreConfig::builder()
            .in_memory_database()
            .network_monitor(Arc::new(StubNetworkMonitor))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "HttpClient")
            }
            other => panic!("expected capability error, got {:?}", other),
        }
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_network_monitor() {
        let result = CoreConfig::builder()
            .in_memory_database()
            .http_client(Arc::new(StubHttpClient))
            .build();

        match result {
            Err(Error::CapabilityMissing { capability, .. }) => {
                assert_eq!(capability, "NetworkMonitor")
            }
            other => panic!("expected capability error, got {:?}", other),
        }
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_defaults() {
        let config = CoreConfig::builder()
            .in_memory_database()
            .build()
            .expect("desktop defaults should succeed");

        assert!(config.is_in_memory());
    }

    #[test]
    fn test_builder_applies_defaults() {
        let config = builder_with_bridges()
            .database_path("/tmp/videos.db")
            .build()
            .unwrap();

        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.feed, FeedSettings::default());
        assert_eq!(config.feed.search_debounce, Duration::from_millis(500));
        assert_eq!(config.feed.carousel_size, 4);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_builder_overrides_individual_settings() {
        let config = builder_with_bridges()
            .in_memory_database()
            .search_debounce(Duration::from_millis(250))
            .refresh_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.feed.search_debounce, Duration::from_millis(250));
        assert_eq!(config.feed.refresh_timeout, Duration::from_secs(5));
        assert_eq!(config.feed.carousel_size, 4);
    }

    #[test]
    fn test_validate_rejects_non_http_feed_url() {
        let result = builder_with_bridges()
            .in_memory_database()
            .feed_url("ftp://example.com/videos.json")
            .build();

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("http")));
    }

    #[test]
    fn test_validate_rejects_empty_database_path() {
        let result = builder_with_bridges().database_path("").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_feed_settings_bounds() {
        let zero_carousel = FeedSettings {
            carousel_size: 0,
            ..FeedSettings::default()
        };
        assert!(zero_carousel.validate().is_err());

        let slow_debounce = FeedSettings {
            search_debounce: Duration::from_secs(11),
            ..FeedSettings::default()
        };
        assert!(slow_debounce.validate().is_err());

        let no_timeout = FeedSettings {
            refresh_timeout: Duration::ZERO,
            ..FeedSettings::default()
        };
        assert!(no_timeout.validate().is_err());

        let zero_debounce = FeedSettings {
            search_debounce: Duration::ZERO,
            ..FeedSettings::default()
        };
        assert!(zero_debounce.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_bridges() {
        let config = builder_with_bridges().in_memory_database().build().unwrap();
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("HttpClient { ... }"));
        assert!(rendered.contains(":memory:"));
    }
}

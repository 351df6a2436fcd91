//! # Database Connection Pool
//!
//! SQLite pool setup for the video cache.
//!
//! - **WAL mode** for file databases so readers never block the refresh writer
//! - **Embedded migrations** from `core-library/migrations`, applied on open
//! - **Health check** before the pool is handed out
//!
//! In-memory databases are private to the connection that created them, so
//! an in-memory pool is pinned to exactly one long-lived connection.
//!
//! ```rust,ignore
//! use core_library::db::{create_pool, DatabaseConfig};
//!
//! let pool = create_pool(DatabaseConfig::new("videos.db")).await?;
//! ```

use crate::{LibraryError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Path value that selects an in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

const MEMORY_URL: &str = "sqlite::memory:";

/// Database configuration for the SQLite connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// sqlx connection URL (`sqlite:<path>` or `sqlite::memory:`)
    pub database_url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// Maximum time to wait for a connection from the pool
    pub acquire_timeout: Duration,
    pub max_lifetime: Option<Duration>,
    pub idle_timeout: Option<Duration>,
    /// Number of prepared statements cached per connection
    pub statement_cache_capacity: usize,
}

impl DatabaseConfig {
    /// File-backed database at `database_path`.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        let path = database_path.into();
        Self {
            database_url: format!("sqlite:{}", path.display()),
            min_connections: 1,
            max_connections: 4,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Some(Duration::from_secs(1800)),
            idle_timeout: Some(Duration::from_secs(600)),
            statement_cache_capacity: 64,
        }
    }

    /// Private in-memory database on a single connection that is never
    /// recycled, so the data lives as long as the pool.
    pub fn in_memory() -> Self {
        Self {
            database_url: MEMORY_URL.to_string(),
            min_connections: 1,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: None,
            idle_timeout: None,
            statement_cache_capacity: 64,
        }
    }

    /// Pick [`in_memory`](Self::in_memory) for `":memory:"`, a file database otherwise.
    pub fn from_path(path: &str) -> Self {
        if path == MEMORY_PATH {
            Self::in_memory()
        } else {
            Self::new(path)
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url == MEMORY_URL
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Ignored for in-memory databases, which always use one connection.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn max_lifetime(mut self, lifetime: Option<Duration>) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn statement_cache_capacity(mut self, capacity: usize) -> Self {
        self.statement_cache_capacity = capacity;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Open a configured pool, apply migrations and verify it answers queries.
///
/// # Errors
///
/// Fails if the URL is malformed, the database cannot be opened, a migration
/// fails, or the health check query fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<Pool<Sqlite>> {
    let in_memory = config.is_in_memory();
    let (min_connections, max_connections) = if in_memory {
        (1, 1)
    } else {
        (
            config.min_connections,
            config.max_connections.max(config.min_connections).max(1),
        )
    };

    info!(
        database_url = %config.database_url,
        min_connections,
        max_connections,
        "Creating database connection pool"
    );

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(LibraryError::Database)?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .create_if_missing(true)
        .pragma("cache_size", "-16000")
        .statement_cache_capacity(config.statement_cache_capacity);

    let (max_lifetime, idle_timeout) = if in_memory {
        (None, None)
    } else {
        (config.max_lifetime, config.idle_timeout)
    };

    let pool = SqlitePoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .acquire_timeout(config.acquire_timeout)
        .max_lifetime(max_lifetime)
        .idle_timeout(idle_timeout)
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create connection pool");
            LibraryError::Database(e)
        })?;

    debug!(connections = pool.size(), "Connection pool opened");

    run_migrations(&pool).await?;
    health_check(&pool).await?;

    info!("Database ready");
    Ok(pool)
}

/// In-memory pool with migrations applied, for tests.
pub async fn create_test_pool() -> Result<Pool<Sqlite>> {
    create_pool(DatabaseConfig::in_memory()).await
}

async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    debug!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Migration failed");
            LibraryError::Migration(e.to_string())
        })?;

    Ok(())
}

async fn health_check(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map_err(|e| {
        warn!(error = %e, "Database health check failed");
        LibraryError::Database(e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_create_test_pool_runs_migrations() {
        let pool = create_test_pool().await.unwrap();

        let row = sqlx::query("SELECT COUNT(*) AS n FROM videos")
            .fetch_one(&pool)
            .await
            .unwrap();
        let count: i64 = row.get("n");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_in_memory_pool_is_single_connection() {
        let config = DatabaseConfig::in_memory().max_connections(8);
        let pool = create_pool(config).await.unwrap();
        assert_eq!(pool.options().get_max_connections(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let pool = create_test_pool().await.unwrap();
        assert!(health_check(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = create_test_pool().await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_from_path_selects_backend() {
        assert!(DatabaseConfig::from_path(MEMORY_PATH).is_in_memory());

        let file = DatabaseConfig::from_path("/tmp/videos.db");
        assert!(!file.is_in_memory());
        assert_eq!(file.database_url, "sqlite:/tmp/videos.db");
    }

    #[test]
    fn test_database_config_builder() {
        let config = DatabaseConfig::new("videos.db")
            .min_connections(2)
            .max_connections(6)
            .acquire_timeout(Duration::from_secs(5))
            .statement_cache_capacity(16);

        assert_eq!(config.min_connections, 2);
        assert_eq!(config.max_connections, 6);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.statement_cache_capacity, 16);
    }

    #[tokio::test]
    async fn test_file_database_uses_wal() {
        let dir = std::env::temp_dir().join(format!("vidfeed-db-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("wal.db");
        let _ = std::fs::remove_file(&path);

        let pool = create_pool(DatabaseConfig::new(&path)).await.unwrap();
        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");

        pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}

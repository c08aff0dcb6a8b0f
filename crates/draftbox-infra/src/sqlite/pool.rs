//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. `DatabasePool` holds a
//! multi-connection read-only pool for concurrent reads and a
//! single-connection writer pool for serialized writes. Opening the pool
//! runs the embedded migrations, which create the drafts table and its
//! indexes if they do not exist yet.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Connection parameters for a `DatabasePool`.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub busy_timeout: Duration,
    pub max_readers: u32,
}

impl PoolSettings {
    /// Settings with the default 5-second busy timeout and 8 readers.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            busy_timeout: Duration::from_secs(5),
            max_readers: 8,
        }
    }
}

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection read-only pool for SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/DELETE.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open a pool with default settings.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect(&PoolSettings::new(database_url)).await
    }

    /// Open the writer, run migrations on it, then open the reader pool.
    pub async fn connect(settings: &PoolSettings) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(&settings.database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(settings.busy_timeout)
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        // Run migrations on writer before opening reader pool
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(settings.max_readers.max(1))
            .connect_with(read_opts)
            .await?;

        tracing::debug!(url = %settings.database_url, "opened draft database");

        Ok(Self { reader, writer })
    }
}

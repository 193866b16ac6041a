//! Playdeck Storage
//!
//! `SQLite` playlist store for Playdeck.
//!
//! Persists song metadata keyed by a unique audio URL and returns the full
//! playlist ordered by title.
//!
//! # Example
//!
//! ```rust,no_run
//! use playdeck_core::NewSong;
//! use playdeck_storage::{create_pool, run_migrations, SongStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://playlist.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SongStore::new(pool);
//! store.insert_if_absent(&NewSong::new("track1", "/uploads/track1.mp3")).await?;
//!
//! let songs = store.get_all().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod songs;

pub use context::SongStore;
pub use error::{Result, StorageError};
pub use songs::InsertOutcome;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Should be called once at startup so the `songs` table exists.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://playlist.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(url = %database_url, "Database pool ready");

    Ok(pool)
}

/// Store context bundling a pool with the song operations
use crate::error::Result;
use crate::songs::{self, InsertOutcome};
use playdeck_core::{NewSong, Song};
use sqlx::SqlitePool;

/// Playlist store backed by `SQLite`
#[derive(Debug, Clone)]
pub struct SongStore {
    pool: SqlitePool,
}

impl SongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) a database and apply migrations
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Full playlist ordered by title
    pub async fn get_all(&self) -> Result<Vec<Song>> {
        songs::get_all(&self.pool).await
    }

    pub async fn get_by_audio_url(&self, audio_url: &str) -> Result<Option<Song>> {
        songs::get_by_audio_url(&self.pool, audio_url).await
    }

    /// Insert unless a song with the same audio URL exists
    pub async fn insert_if_absent(&self, song: &NewSong) -> Result<InsertOutcome> {
        songs::insert_if_absent(&self.pool, song).await
    }

    pub async fn count(&self) -> Result<i64> {
        songs::count(&self.pool).await
    }
}

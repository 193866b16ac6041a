use crate::error::{Result, StorageError};
use playdeck_core::{NewSong, Song, SongId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Result of an insert-or-ignore on the audio URL key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was created with this id
    Inserted(SongId),
    /// A song with the same audio URL already existed; nothing changed
    Duplicate,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    Ok(Song {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        album_art_url: row.try_get("albumArtUrl")?,
        audio_url: row.try_get("audioUrl")?,
    })
}

/// Get all songs ordered by title
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, artist, albumArtUrl, audioUrl
        FROM songs
        ORDER BY title, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(song_from_row).collect()
}

/// Get song by id
pub async fn get_by_id(pool: &SqlitePool, id: SongId) -> Result<Song> {
    let row = sqlx::query(
        r#"
        SELECT id, title, artist, albumArtUrl, audioUrl
        FROM songs
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => song_from_row(&row),
        None => Err(StorageError::not_found("Song", id.to_string())),
    }
}

/// Get song by its (unique) audio URL
pub async fn get_by_audio_url(pool: &SqlitePool, audio_url: &str) -> Result<Option<Song>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, artist, albumArtUrl, audioUrl
        FROM songs
        WHERE audioUrl = ?
        "#,
    )
    .bind(audio_url)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(song_from_row).transpose()
}

/// Insert a song, ignoring the insert if its audio URL already exists
pub async fn insert_if_absent(pool: &SqlitePool, song: &NewSong) -> Result<InsertOutcome> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO songs (title, artist, albumArtUrl, audioUrl)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album_art_url)
    .bind(&song.audio_url)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::debug!(audio_url = %song.audio_url, "Song already stored, insert ignored");
        Ok(InsertOutcome::Duplicate)
    } else {
        Ok(InsertOutcome::Inserted(result.last_insert_rowid()))
    }
}

/// Number of stored songs
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

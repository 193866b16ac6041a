/// Song domain type
use serde::{Deserialize, Serialize};

/// Song identifier (auto-incremented by the store)
pub type SongId = i64;

/// URL path under which uploaded audio files are served
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Build the relative audio URL for a stored upload
///
/// The file name is percent-encoded as one path segment, so `#`, `?` and
/// `%` in a name stay part of the path.
pub fn uploads_url_path(file_name: &str) -> String {
    format!("{}/{}", UPLOADS_ROUTE, urlencoding::encode(file_name))
}

/// A playlist entry
///
/// Serialized with camelCase keys, matching the `songs` table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique song identifier
    pub id: SongId,

    /// Song title (derived from the uploaded file name)
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: Option<String>,

    /// Album art URL
    #[serde(default)]
    pub album_art_url: Option<String>,

    /// Audio source URL, unique across the playlist
    pub audio_url: String,
}

impl Song {
    /// Return a copy with a different audio URL
    pub fn with_audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = audio_url.into();
        self
    }
}

/// Data for inserting a song into the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    /// Song title
    pub title: String,
    /// Artist name
    pub artist: Option<String>,
    /// Album art URL
    pub album_art_url: Option<String>,
    /// Audio source URL (the de-duplication key)
    pub audio_url: String,
}

impl NewSong {
    /// Create a new song record with only the required fields
    pub fn new(title: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: None,
            album_art_url: None,
            audio_url: audio_url.into(),
        }
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the album art URL
    pub fn with_album_art_url(mut self, url: impl Into<String>) -> Self {
        self.album_art_url = Some(url.into());
        self
    }
}

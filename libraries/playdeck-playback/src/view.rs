//! Presentation view model
//!
//! Pure functions turning a [`PlaybackSnapshot`] into display values. No
//! rendering happens here.

use crate::types::PlaybackSnapshot;
use playdeck_core::Song;
use serde::Serialize;

const NO_SONG_TITLE: &str = "No Song Loaded";
const NO_SONG_ARTIST: &str = "Select a playlist";

/// Seek range upper bound while the duration is unknown
const UNKNOWN_SEEK_MAX: f64 = 100.0;

/// Format seconds as `m:ss`
///
/// Fractions are floored; negative and non-finite input shows `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Now-playing panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album_art_url: Option<String>,
    pub is_playing: bool,
    pub progress_percent: f64,
    pub elapsed: String,
    pub total: String,
    pub seek_value: f64,
    pub seek_max: f64,
    /// Transport and seek controls respond only with a current track
    pub controls_enabled: bool,
}

impl NowPlaying {
    pub fn from_snapshot(snapshot: &PlaybackSnapshot) -> Self {
        let track = snapshot.current_track.as_ref();
        let seek_max = if snapshot.duration > 0.0 {
            snapshot.duration
        } else {
            UNKNOWN_SEEK_MAX
        };

        Self {
            title: track.map_or_else(|| NO_SONG_TITLE.to_string(), |s| s.title.clone()),
            artist: track
                .and_then(|s| s.artist.clone())
                .unwrap_or_else(|| NO_SONG_ARTIST.to_string()),
            album_art_url: track.and_then(|s| s.album_art_url.clone()),
            is_playing: snapshot.is_playing,
            progress_percent: snapshot.progress_percent,
            elapsed: format_time(snapshot.current_time),
            total: format_time(snapshot.duration),
            seek_value: snapshot.current_time,
            seek_max,
            controls_enabled: track.is_some(),
        }
    }
}

/// One playlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistRow {
    pub index: usize,
    pub title: String,
    pub artist: Option<String>,
    pub is_current: bool,
    /// Current and playing (drives the "now playing" indicator)
    pub is_playing: bool,
}

pub fn playlist_rows(songs: &[Song], snapshot: &PlaybackSnapshot) -> Vec<PlaylistRow> {
    songs
        .iter()
        .enumerate()
        .map(|(index, song)| {
            let is_current = snapshot.current_index == Some(index);
            PlaylistRow {
                index,
                title: song.title.clone(),
                artist: song.artist.clone(),
                is_current,
                is_playing: is_current && snapshot.is_playing,
            }
        })
        .collect()
}

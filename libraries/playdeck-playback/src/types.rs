//! Core types for playback control

use playdeck_core::Song;
use serde::{Deserialize, Serialize};

/// Coarse controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Nothing selected yet
    Idle,

    /// A track is bound but not playing
    Paused,

    /// A track is bound and playback is intended
    Playing,
}

/// Read-only view of the controller state
///
/// `progress_percent` and `current_track` are derived at snapshot time and
/// never stored by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Index into the current playlist
    pub current_index: Option<usize>,

    /// Playback intent (may be true before audio is actually produced)
    pub is_playing: bool,

    /// Track duration in seconds, 0 until metadata is loaded
    pub duration: f64,

    /// Read head in seconds, always within `[0, duration]`
    pub current_time: f64,

    /// Derived progress in `[0, 100]`
    pub progress_percent: f64,

    /// Song at `current_index`
    pub current_track: Option<Song>,
}

impl PlaybackSnapshot {
    pub fn status(&self) -> PlaybackStatus {
        match (self.current_index, self.is_playing) {
            (None, _) => PlaybackStatus::Idle,
            (Some(_), false) => PlaybackStatus::Paused,
            (Some(_), true) => PlaybackStatus::Playing,
        }
    }
}

/// Progress percentage for a read head and duration
///
/// Always within `[0, 100]`; 0 while the duration is unknown.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if duration > 0.0 && duration.is_finite() {
        let percent = current_time / duration * 100.0;
        if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        }
    } else {
        0.0
    }
}

//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the controller and drained by the presentation layer before re-rendering:
//! - Play/pause intent changes
//! - Track changes (rebinds and playlist remaps)
//! - Position and duration updates
//! - Playlist replacement

use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback intent changed
    StateChanged { is_playing: bool },

    /// The current track changed
    TrackChanged {
        /// Index of the new current track
        index: usize,
        /// Audio source of the new current track
        audio_url: String,
    },

    /// The current track was cleared (playlist replaced with an empty one)
    TrackCleared,

    /// Read head or duration changed
    PositionChanged { current_time: f64, duration: f64 },

    /// The playlist was replaced wholesale
    PlaylistReplaced { len: usize },
}

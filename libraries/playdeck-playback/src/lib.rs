//! Playdeck - Playback Control
//!
//! Platform-agnostic playlist playback for Playdeck.
//!
//! This crate provides:
//! - A sequential playback controller (select, toggle, next/previous, seek)
//! - End-of-track auto-advance with wrap-around
//! - Wholesale playlist replacement that follows the current song
//! - A media engine boundary with generation-tagged events
//! - A presentation view model (now-playing panel, playlist rows)
//!
//! # Architecture
//!
//! `playdeck-playback` does not produce audio. The platform provides a
//! [`MediaBackend`] that creates one [`MediaEngine`] per selected track.
//! Engines report metadata, time updates and end-of-track through a
//! [`Subscription`]; the controller applies those events on the next
//! [`PlaybackController::poll_engine_events`] call and drops any event from
//! an engine it has already released.
//!
//! # Example
//!
//! ```rust
//! use playdeck_core::Song;
//! use playdeck_playback::{
//!     EngineError, MediaBackend, MediaEngine, PlaybackController, PlaybackStatus, Subscription,
//! };
//!
//! struct SilentEngine;
//!
//! impl MediaEngine for SilentEngine {
//!     fn play(&mut self) -> Result<(), EngineError> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn seek_to(&mut self, _seconds: f64) {}
//!     fn subscribe(&mut self, _subscription: Subscription) {}
//!     fn unsubscribe(&mut self) {}
//! }
//!
//! struct SilentBackend;
//!
//! impl MediaBackend for SilentBackend {
//!     type Engine = SilentEngine;
//!     fn create(&mut self, _audio_url: &str) -> SilentEngine { SilentEngine }
//! }
//!
//! let songs = vec![Song {
//!     id: 1,
//!     title: "Intro".to_string(),
//!     artist: None,
//!     album_art_url: None,
//!     audio_url: "/uploads/intro.mp3".to_string(),
//! }];
//!
//! let mut controller = PlaybackController::new(SilentBackend);
//! controller.set_playlist(songs);
//!
//! // First toggle starts the first song
//! controller.toggle_play_pause();
//! assert_eq!(controller.status(), PlaybackStatus::Playing);
//! assert_eq!(controller.current_index(), Some(0));
//!
//! controller.toggle_play_pause();
//! assert_eq!(controller.status(), PlaybackStatus::Paused);
//! ```

#![forbid(unsafe_code)]

pub mod controller;
pub mod engine;
pub mod error;
pub mod events;
pub mod types;
pub mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use controller::PlaybackController;
pub use engine::{
    EngineError, EngineEvent, EngineEventKind, Generation, MediaBackend, MediaEngine, Subscription,
};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use types::{progress_percent, PlaybackSnapshot, PlaybackStatus};
pub use view::{format_time, playlist_rows, NowPlaying, PlaylistRow};

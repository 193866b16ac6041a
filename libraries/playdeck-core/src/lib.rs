//! Playdeck Core
//!
//! Domain types shared by the playlist server and the player client.
//!
//! # Example
//!
//! ```rust
//! use playdeck_core::{NewSong, uploads_url_path};
//!
//! let song = NewSong::new("track1", uploads_url_path("track1.mp3"));
//! assert_eq!(song.audio_url, "/uploads/track1.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{uploads_url_path, NewSong, Song, SongId, UPLOADS_ROUTE};

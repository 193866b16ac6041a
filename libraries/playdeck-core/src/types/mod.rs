//! Playlist domain types

mod song;

pub use song::{uploads_url_path, NewSong, Song, SongId, UPLOADS_ROUTE};

//! Playdeck Server Library
//!
//! Playlist store and upload server: serves the stored playlist, accepts
//! batches of audio files and serves the stored files back.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{
    file_storage::FileStorage,
    ingestion::{IngestReport, IngestionService, UploadedFile},
};
pub use state::AppState;

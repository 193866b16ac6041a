//! Error types for the Playdeck client.
//!
//! The `Display` text of each variant is what a player session shows to the
//! user.

use thiserror::Error;

/// Errors that can occur when talking to a Playdeck server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Playlist endpoint answered with a non-success status
    #[error("Failed to fetch playlist from server.")]
    FetchFailed { status: u16 },

    /// Upload endpoint answered with a non-success status
    #[error("{message}")]
    UploadFailed { status: u16, message: String },

    /// Upload attempted with an empty batch
    #[error("No files were selected for upload.")]
    NoFiles,

    /// Invalid server or audio URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// IO error while reading files to upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Classify a transport error
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ServerUnreachable(error.to_string())
        } else {
            Self::Request(error)
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

//! Types for the Playdeck client.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Server connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server origin (e.g., `http://localhost:3000`)
    pub url: String,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// One file in an upload batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent with the multipart part
    pub file_name: String,
    /// Declared media type; guessed from the extension when absent
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, keeping only its final path component as name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self::new(file_name, bytes))
    }

    /// Declared media type, or a guess from the file extension
    pub fn media_type(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        })
    }
}

/// Upload response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub message: String,
    #[serde(default)]
    pub inserted: usize,
    #[serde(default)]
    pub duplicates: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub failed: usize,
}

/// Error response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_prefers_declared_type() {
        let file = UploadFile::new("song.bin", vec![1, 2]).with_content_type("audio/flac");
        assert_eq!(file.media_type(), "audio/flac");
    }

    #[test]
    fn media_type_guessed_from_extension() {
        assert_eq!(UploadFile::new("song.mp3", vec![]).media_type(), "audio/mpeg");
        assert_eq!(
            UploadFile::new("README", vec![]).media_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn summary_counts_default_to_zero() {
        let summary: UploadSummary =
            serde_json::from_str(r#"{"message":"Files uploaded and processed successfully."}"#)
                .unwrap();
        assert_eq!(summary.message, "Files uploaded and processed successfully.");
        assert_eq!(summary.inserted, 0);
    }

    #[tokio::test]
    async fn from_path_keeps_file_name_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track1.mp3");
        tokio::fs::write(&path, b"ID3").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "track1.mp3");
        assert_eq!(file.bytes, b"ID3");
        assert!(file.content_type.is_none());
    }
}

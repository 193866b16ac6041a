//! HTTP client for the Playdeck server.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, ErrorBody, UploadFile, UploadSummary};
use playdeck_core::Song;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Multipart field the server reads uploaded files from.
pub const UPLOAD_FIELD: &str = "songs";

const UPLOAD_FAILED: &str = "Upload failed";

/// Client for the playlist and upload endpoints.
///
/// # Example
///
/// ```ignore
/// use playdeck_client::{ClientConfig, PlaydeckClient};
///
/// let client = PlaydeckClient::new(ClientConfig::new("http://localhost:3000"))?;
/// let songs = client.fetch_playlist().await?;
/// println!("{} songs", songs.len());
/// ```
#[derive(Debug, Clone)]
pub struct PlaydeckClient {
    http: Client,
    base_url: String,
}

impl PlaydeckClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Playdeck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Normalized server origin, without trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the stored playlist, ordered by title.
    ///
    /// Relative audio URLs are rewritten against the server origin.
    pub async fn fetch_playlist(&self) -> Result<Vec<Song>> {
        let url = format!("{}/api/songs", self.base_url);
        debug!(url = %url, "Fetching playlist");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Playlist fetch rejected");
            return Err(ClientError::FetchFailed {
                status: status.as_u16(),
            });
        }

        let songs: Vec<Song> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse playlist response: {}", e))
        })?;

        let songs = songs
            .into_iter()
            .map(|song| {
                let audio_url = absolutize_audio_url(&self.base_url, &song.audio_url)?;
                Ok(song.with_audio_url(audio_url))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(songs = songs.len(), "Fetched playlist");
        Ok(songs)
    }

    /// Upload a batch of files in one multipart request.
    pub async fn upload_songs(&self, files: Vec<UploadFile>) -> Result<UploadSummary> {
        if files.is_empty() {
            return Err(ClientError::NoFiles);
        }

        let count = files.len();
        // File names go out verbatim, as browsers send them
        let mut form = Form::new().percent_encode_noop();
        for file in files {
            let media_type = file.media_type();
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&media_type)?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let url = format!("{}/api/upload", self.base_url);
        debug!(url = %url, files = count, "Uploading files");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            let summary: UploadSummary = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse upload response: {}", e))
            })?;

            info!(
                files = count,
                inserted = summary.inserted,
                duplicates = summary.duplicates,
                skipped = summary.skipped,
                failed = summary.failed,
                "Upload complete"
            );

            Ok(summary)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| UPLOAD_FAILED.to_string());

            warn!(status = status.as_u16(), error = %message, "Upload rejected");
            Err(ClientError::UploadFailed {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Read files from disk and upload them as one batch.
    pub async fn upload_paths(&self, paths: &[PathBuf]) -> Result<UploadSummary> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(UploadFile::from_path(path).await?);
        }
        self.upload_songs(files).await
    }
}

/// Anchor a relative audio URL at the server origin.
///
/// Absolute `http(s)` URLs pass through unchanged.
pub fn absolutize_audio_url(base_url: &str, audio_url: &str) -> Result<String> {
    if audio_url.starts_with("http://") || audio_url.starts_with("https://") {
        return Ok(audio_url.to_string());
    }

    let base = base_url.trim_end_matches('/');
    let joined = if audio_url.starts_with('/') {
        format!("{}{}", base, audio_url)
    } else {
        format!("{}/{}", base, audio_url)
    };

    Url::parse(&joined)
        .map(String::from)
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", joined, e)))
}

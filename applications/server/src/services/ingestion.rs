/// Ingestion service - turns uploaded files into playlist entries
use crate::config::IngestionSettings;
use crate::services::file_storage::FileStorage;
use bytes::Bytes;
use playdeck_core::{uploads_url_path, NewSong};
use playdeck_storage::{InsertOutcome, SongStore};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

const OCTET_STREAM: &str = "application/octet-stream";

/// One file received in an upload request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// Media type declared by the client
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Whether this file is audio
    ///
    /// The declared type decides. Without one, or with the generic
    /// `application/octet-stream`, the type is guessed from the extension.
    pub fn is_audio(&self) -> bool {
        match self.content_type.as_deref() {
            Some(declared) if declared != OCTET_STREAM => declared.starts_with("audio/"),
            _ => mime_guess::from_path(&self.file_name)
                .iter()
                .any(|guess| guess.type_() == mime_guess::mime::AUDIO),
        }
    }
}

/// Per-batch outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct IngestionService {
    store: SongStore,
    files: FileStorage,
    settings: IngestionSettings,
}

impl IngestionService {
    pub fn new(store: SongStore, files: FileStorage, settings: IngestionSettings) -> Self {
        Self {
            store,
            files,
            settings,
        }
    }

    /// Store every audio file in the batch and record it in the playlist
    ///
    /// Non-audio files are skipped without being written. A failure on one
    /// file is logged and counted; the rest of the batch still runs.
    pub async fn ingest(&self, files: Vec<UploadedFile>) -> IngestReport {
        let mut report = IngestReport::default();

        for file in files {
            if !file.is_audio() {
                debug!(
                    file = %file.file_name,
                    content_type = ?file.content_type,
                    "Skipping non-audio file"
                );
                report.skipped += 1;
                continue;
            }

            match self.ingest_one(&file).await {
                Ok(InsertOutcome::Inserted(id)) => {
                    debug!(file = %file.file_name, song_id = id, "Song added");
                    report.inserted += 1;
                }
                Ok(InsertOutcome::Duplicate) => {
                    debug!(file = %file.file_name, "Song already in playlist");
                    report.duplicates += 1;
                }
                Err(e) => {
                    warn!(file = %file.file_name, error = %e, "Failed to ingest file");
                    report.failed += 1;
                }
            }
        }

        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            skipped = report.skipped,
            failed = report.failed,
            "Upload batch processed"
        );

        report
    }

    async fn ingest_one(&self, file: &UploadedFile) -> crate::Result<InsertOutcome> {
        let (stored_name, _) = self.files.store(&file.file_name, &file.data).await?;

        let title = title_from_file_name(&stored_name);
        let song = NewSong::new(title, uploads_url_path(&stored_name))
            .with_artist(self.settings.default_artist.clone())
            .with_album_art_url(self.settings.default_album_art_url.clone());

        Ok(self.store.insert_if_absent(&song).await?)
    }
}

/// File name with its extension removed
pub fn title_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string()
}

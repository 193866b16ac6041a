/// Upload API routes
use crate::{
    error::{Result, ServerError},
    services::{IngestReport, UploadedFile},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;

/// Multipart field carrying the uploaded files
pub const UPLOAD_FIELD: &str = "songs";

const NO_FILES: &str = "No files were uploaded.";
const SUCCESS: &str = "Files uploaded and processed successfully.";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: IngestReport,
}

/// POST /api/upload - store a batch of audio files and add them to the playlist
///
/// Responds 201 once the batch has been processed, even when individual
/// files were skipped or failed; 400 when the request carries no files.
pub async fn upload_songs(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let files = read_upload_files(&headers, body).await?;
    if files.is_empty() {
        return Err(ServerError::BadRequest(NO_FILES.to_string()));
    }

    let report = app_state.ingestion.ingest(files).await;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: SUCCESS.to_string(),
            report,
        }),
    ))
}

/// Collect the file parts of the `songs` field
///
/// A request that is not multipart carries no files.
async fn read_upload_files(headers: &HeaderMap, body: Bytes) -> Result<Vec<UploadedFile>> {
    let Some(boundary) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .and_then(|content_type| multer::parse_boundary(content_type).ok())
    else {
        return Ok(Vec::new());
    };

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(ToString::to_string);
        let data = field.bytes().await?;

        files.push(UploadedFile::new(file_name, content_type, data));
    }

    Ok(files)
}

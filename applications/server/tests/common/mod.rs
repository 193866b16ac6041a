//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use playdeck_server::{api, config::ServerConfig, state::AppState};
use playdeck_storage::SongStore;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const BOUNDARY: &str = "playdeck-test-boundary";

/// Router backed by a temp-dir database and uploads directory
pub struct TestApp {
    pub router: Router,
    pub store: SongStore,
    pub uploads_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Build with a tweaked default configuration
    pub async fn with_config(tweak: impl FnOnce(&mut ServerConfig)) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let uploads_dir = temp_dir.path().join("uploads");

        let mut config = ServerConfig::default();
        let db_path = temp_dir.path().join("test.db");
        config.storage.database_url = format!("sqlite://{}", db_path.display());
        config.storage.uploads_dir = uploads_dir.clone();
        tweak(&mut config);

        let store = SongStore::connect(&config.storage.database_url).await.unwrap();
        let app_state = AppState::new(config, store.clone());
        app_state.file_storage.initialize().await.unwrap();

        Self {
            router: api::create_router(app_state),
            store,
            uploads_dir,
            _temp_dir: temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn upload(&self, parts: &[Part]) -> Response<Body> {
        self.send(multipart_request(parts)).await
    }
}

/// One multipart part
pub struct Part {
    pub field: &'static str,
    pub file_name: Option<&'static str>,
    pub content_type: Option<&'static str>,
    pub data: Vec<u8>,
}

impl Part {
    pub fn file(file_name: &'static str, content_type: &'static str, data: &[u8]) -> Self {
        Self {
            field: "songs",
            file_name: Some(file_name),
            content_type: Some(content_type),
            data: data.to_vec(),
        }
    }

    pub fn untyped_file(file_name: &'static str, data: &[u8]) -> Self {
        Self {
            field: "songs",
            file_name: Some(file_name),
            content_type: None,
            data: data.to_vec(),
        }
    }

    pub fn text(field: &'static str, value: &str) -> Self {
        Self {
            field,
            file_name: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }
}

pub fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        let disposition = match part.file_name {
            Some(name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.field),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

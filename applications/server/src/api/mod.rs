/// API route modules
pub mod health;
pub mod songs;
pub mod upload;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use playdeck_core::UPLOADS_ROUTE;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// - `GET /api/health`
/// - `GET /api/songs`
/// - `POST /api/upload` (multipart, field `songs`)
/// - `GET /uploads/<name>` serves stored files
pub fn create_router(app_state: AppState) -> Router {
    let max_upload_bytes = app_state.config.storage.max_upload_bytes;
    let uploads = ServeDir::new(app_state.file_storage.base_path());

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/songs", get(songs::list_songs))
        .route(
            "/upload",
            post(upload::upload_songs).layer(DefaultBodyLimit::max(max_upload_bytes)),
        );

    Router::new()
        .nest("/api", api_routes)
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

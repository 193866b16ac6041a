/// Playlist API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use playdeck_core::Song;

/// GET /api/songs - every stored song, ordered by title
pub async fn list_songs(State(app_state): State<AppState>) -> Result<Json<Vec<Song>>> {
    let songs = app_state.store.get_all().await?;
    Ok(Json(songs))
}

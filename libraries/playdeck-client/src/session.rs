//! Player session: playlist sync, uploads and the user-visible error.

use crate::client::PlaydeckClient;
use crate::error::Result;
use crate::types::{UploadFile, UploadSummary};
use playdeck_playback::{
    playlist_rows, MediaBackend, NowPlaying, PlaybackController, PlaybackSnapshot, PlaylistRow,
};
use tracing::{debug, error};

/// One listener's session against a Playdeck server.
///
/// Owns the playback controller. `refresh` and `upload` take `&mut self`,
/// so at most one fetch is in flight per session and a slow response can
/// never overwrite a newer playlist.
pub struct PlayerSession<B: MediaBackend> {
    client: PlaydeckClient,
    controller: PlaybackController<B>,
    error: Option<String>,
}

impl<B: MediaBackend> PlayerSession<B> {
    pub fn new(client: PlaydeckClient, backend: B) -> Self {
        Self {
            client,
            controller: PlaybackController::new(backend),
            error: None,
        }
    }

    /// Fetch the playlist and hand it to the controller.
    ///
    /// On failure the error message is set and the current playlist and
    /// playback state are left as they were.
    pub async fn refresh(&mut self) -> Result<usize> {
        self.error = None;

        match self.client.fetch_playlist().await {
            Ok(songs) => {
                let count = songs.len();
                self.controller.set_playlist(songs);
                debug!(songs = count, "Playlist refreshed");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Playlist refresh failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Upload a batch, then refresh the playlist.
    pub async fn upload(&mut self, files: Vec<UploadFile>) -> Result<UploadSummary> {
        self.error = None;

        let summary = match self.client.upload_songs(files).await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, "Upload failed");
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.refresh().await?;
        Ok(summary)
    }

    /// Message to show the user, if the last operation failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn client(&self) -> &PlaydeckClient {
        &self.client
    }

    pub fn controller(&self) -> &PlaybackController<B> {
        &self.controller
    }

    /// Controller access for transport controls and engine polling
    pub fn controller_mut(&mut self) -> &mut PlaybackController<B> {
        &mut self.controller
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying::from_snapshot(&self.controller.snapshot())
    }

    pub fn playlist_rows(&self) -> Vec<PlaylistRow> {
        playlist_rows(self.controller.playlist(), &self.controller.snapshot())
    }
}

//! Playdeck Client
//!
//! HTTP client library and player session for the Playdeck server API.
//!
//! # Features
//!
//! - **Playlist sync**: Fetch the stored playlist with absolute audio URLs
//! - **Upload**: Send a batch of files as one multipart request
//! - **Session**: Keep a playback controller in sync with the server and
//!   surface failures as a dismissible message
//!
//! # Example
//!
//! ```ignore
//! use playdeck_client::{ClientConfig, PlaydeckClient, PlayerSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlaydeckClient::new(ClientConfig::new("http://localhost:3000"))?;
//!     let mut session = PlayerSession::new(client, MyBackend::default());
//!
//!     if session.refresh().await.is_err() {
//!         eprintln!("{}", session.error().unwrap_or_default());
//!     }
//!
//!     session.controller_mut().toggle_play_pause();
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod session;
mod types;

pub use client::{absolutize_audio_url, PlaydeckClient, UPLOAD_FIELD};
pub use error::{ClientError, Result};
pub use session::PlayerSession;
pub use types::{ClientConfig, UploadFile, UploadSummary};

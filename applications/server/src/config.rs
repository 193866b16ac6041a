/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read when present
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_ingestion")]
    pub ingestion: IngestionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory uploaded files are written to and served from
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Upper bound for one upload request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Placeholder metadata for uploaded songs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestionSettings {
    #[serde(default = "default_artist")]
    pub default_artist: String,

    #[serde(default = "default_album_art_url")]
    pub default_album_art_url: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml`; an explicit path must
    /// exist. Environment variables use the `PLAYDECK_` prefix with `__`
    /// between section and key (`PLAYDECK_SERVER__PORT=8080`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with PLAYDECK_)
        settings = settings.add_source(
            config::Environment::with_prefix("PLAYDECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Server port must not be 0".to_string()));
        }

        if self.storage.uploads_dir.as_os_str().is_empty() {
            return Err(ServerError::Config(
                "Uploads directory is required (set PLAYDECK_STORAGE__UPLOADS_DIR)".to_string(),
            ));
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ServerError::Config(
                "Upload limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        uploads_dir: default_uploads_dir(),
        max_upload_bytes: default_max_upload_bytes(),
    }
}

fn default_database_url() -> String {
    "sqlite://./playlist.db".to_string()
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_max_upload_bytes() -> usize {
    512 * 1024 * 1024
}

fn default_ingestion() -> IngestionSettings {
    IngestionSettings {
        default_artist: default_artist(),
        default_album_art_url: default_album_art_url(),
    }
}

fn default_artist() -> String {
    "Unknown Artist".to_string()
}

fn default_album_art_url() -> String {
    "https://picsum.photos/seed/default-art/500/500".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            ingestion: default_ingestion(),
        }
    }
}

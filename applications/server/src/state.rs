/// Shared application state
use crate::config::ServerConfig;
use crate::services::{FileStorage, IngestionService};
use playdeck_storage::SongStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SongStore,
    pub file_storage: Arc<FileStorage>,
    pub ingestion: Arc<IngestionService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: SongStore) -> Self {
        let file_storage = FileStorage::new(config.storage.uploads_dir.clone());
        let ingestion = IngestionService::new(
            store.clone(),
            file_storage.clone(),
            config.ingestion.clone(),
        );

        Self {
            store,
            file_storage: Arc::new(file_storage),
            ingestion: Arc::new(ingestion),
            config: Arc::new(config),
        }
    }
}

/// Server services
pub mod file_storage;
pub mod ingestion;

pub use file_storage::FileStorage;
pub use ingestion::{IngestReport, IngestionService, UploadedFile};

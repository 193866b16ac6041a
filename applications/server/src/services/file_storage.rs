/// File storage service - manages uploaded audio files on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize the uploads directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Store an uploaded file under its sanitized name
    ///
    /// An existing file with the same name is overwritten. Returns the
    /// stored name together with its path.
    pub async fn store(&self, file_name: &str, data: &[u8]) -> Result<(String, PathBuf)> {
        let name = sanitize_file_name(file_name).ok_or_else(|| {
            ServerError::BadRequest(format!("Invalid file name: {:?}", file_name))
        })?;
        let path = self.base_path.join(&name);

        // Ensure parent directory exists
        fs::create_dir_all(&self.base_path).await?;

        fs::write(&path, data).await?;
        Ok((name, path))
    }

    /// Path a stored file would live at
    pub fn path_for(&self, file_name: &str) -> Option<PathBuf> {
        sanitize_file_name(file_name).map(|name| self.base_path.join(name))
    }

    /// Check if a file is stored
    pub fn exists(&self, file_name: &str) -> bool {
        self.path_for(file_name).is_some_and(|path| path.is_file())
    }
}

/// Reduce a client-supplied file name to its final path component
///
/// Both `/` and `\` count as separators. Returns `None` for names that
/// are empty or resolve to `.`/`..`.
pub fn sanitize_file_name(file_name: &str) -> Option<String> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('\0', "");

    match name.as_str() {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

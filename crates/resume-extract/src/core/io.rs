//! Byte acquisition for uploaded files.

use crate::types::{FileContent, UploadedFile};
use crate::{ResumeExtractError, Result};
use async_trait::async_trait;
use tokio::fs;

/// Source of an uploaded file's bytes.
///
/// The pipeline reads through this trait so tests can inject readers that fail
/// or observe which files were touched.
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Read the full content of `file`.
    ///
    /// # Errors
    ///
    /// Returns `ResumeExtractError::Io` when the bytes cannot be acquired.
    async fn read(&self, file: &UploadedFile) -> Result<Vec<u8>>;
}

/// Reads in-memory uploads directly and path-backed files with `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFileReader;

#[async_trait]
impl FileReader for DefaultFileReader {
    async fn read(&self, file: &UploadedFile) -> Result<Vec<u8>> {
        match file.content() {
            FileContent::Bytes(bytes) => Ok(bytes.to_vec()),
            FileContent::Path(path) => fs::read(path).await.map_err(ResumeExtractError::Io),
        }
    }
}

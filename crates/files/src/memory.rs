//! In-memory text file saver.

use crate::saver::{sha256_hex, validate_filename, validate_mime_type};
use crate::{FilesError, FilesResult, SaveTextFile, SavedFile, TextFile};
use chrono::Utc;
use std::sync::Mutex;

/// Saver that keeps every saved file in memory, in save order.
///
/// The REST API uses one per request to turn the export into an HTTP attachment.
#[derive(Debug, Default)]
pub struct MemorySaver {
    files: Mutex<Vec<TextFile>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every file saved so far.
    pub fn files(&self) -> FilesResult<Vec<TextFile>> {
        let files = self
            .files
            .lock()
            .map_err(|e| FilesError::Unavailable(e.to_string()))?;
        Ok(files.clone())
    }

    /// Removes and returns the most recently saved file.
    pub fn take_last(&self) -> FilesResult<Option<TextFile>> {
        let mut files = self
            .files
            .lock()
            .map_err(|e| FilesError::Unavailable(e.to_string()))?;
        Ok(files.pop())
    }
}

impl SaveTextFile for MemorySaver {
    fn save_text_file(
        &self,
        filename: &str,
        content: &str,
        mime_type: &str,
    ) -> FilesResult<SavedFile> {
        validate_filename(filename)?;
        validate_mime_type(mime_type)?;

        let mut files = self
            .files
            .lock()
            .map_err(|e| FilesError::Unavailable(e.to_string()))?;
        files.push(TextFile::new(filename, content, mime_type));

        Ok(SavedFile {
            filename: filename.to_owned(),
            location: format!("memory:{}", filename),
            mime_type: mime_type.to_owned(),
            size_bytes: content.len() as u64,
            sha256: sha256_hex(content.as_bytes()),
            saved_at: Utc::now(),
        })
    }
}

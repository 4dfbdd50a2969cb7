//! NLP2FHIR File Export
//!
//! This crate provides the single "save a text file" capability used by the section form when
//! the backend returns a resource bundle.
//!
//! ## Design Principles
//!
//! - Business logic calls one operation, [`SaveTextFile::save_text_file`], and never branches on
//!   where the bytes end up
//! - The concrete saver is chosen at the boundary (CLI, REST API, tests)
//! - Every save returns [`SavedFile`] metadata so callers can report what was written
//!
//! ## Savers
//!
//! ```text
//! SaveTextFile
//! ├── DirectorySaver   # writes <download_dir>/<filename>, like a browser download
//! └── MemorySaver      # keeps files in memory (HTTP attachments, tests)
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use nlp2fhir_files::{DirectorySaver, SaveTextFile};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let saver = DirectorySaver::new(Path::new("downloads"))?;
//! let saved = saver.save_text_file("ResourceBundle.json", "{}", "text/plain")?;
//! println!("saved {} bytes to {}", saved.size_bytes, saved.location);
//! # Ok(())
//! # }
//! ```

mod constants;
mod files;
mod memory;
mod saver;

pub use constants::{DOWNLOAD_HINT_MIME_TYPE, EXPORT_FILENAME, EXPORT_MIME_TYPE};
pub use files::DirectorySaver;
pub use memory::MemorySaver;
pub use saver::{download_url_hint, SaveTextFile, SavedFile, TextFile};

/// Errors that can occur while saving a text file
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// Download directory does not exist or is not a directory
    #[error("Invalid download directory: {0}")]
    InvalidDownloadDirectory(String),

    /// Filename is empty or would escape the download directory
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// MIME type is empty
    #[error("Invalid MIME type: {0}")]
    InvalidMimeType(String),

    /// In-memory saver lock was poisoned by a panicking writer
    #[error("Saver state unavailable: {0}")]
    Unavailable(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results that can fail with a [`FilesError`].
pub type FilesResult<T> = Result<T, FilesError>;

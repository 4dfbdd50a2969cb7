//! The text-file save capability and the types shared by its implementations.

use crate::{FilesError, FilesResult, DOWNLOAD_HINT_MIME_TYPE, EXPORT_FILENAME, EXPORT_MIME_TYPE};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// A text file waiting to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub filename: String,
    pub content: String,
    pub mime_type: String,
}

impl TextFile {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Wraps exported bundle text under the fixed export filename and MIME type.
    pub fn resource_bundle(content: impl Into<String>) -> Self {
        Self::new(EXPORT_FILENAME, content, EXPORT_MIME_TYPE)
    }
}

/// Metadata for a saved file
///
/// Returned by every saver so callers can report where the export went without knowing
/// which saver was used.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct SavedFile {
    /// Name the file was saved under
    pub filename: String,

    /// Where the file was written: a filesystem path, or `memory:<filename>`
    pub location: String,

    /// MIME type the file was saved with
    pub mime_type: String,

    /// Size of the content in bytes
    pub size_bytes: u64,

    /// Hexadecimal SHA-256 digest of the content
    pub sha256: String,

    /// UTC timestamp when the file was saved
    pub saved_at: DateTime<Utc>,
}

/// Capability for saving text as a named file.
///
/// Implementations decide where the bytes go; callers only supply the filename, content and
/// MIME type.
pub trait SaveTextFile: Send + Sync {
    /// Saves `content` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns `FilesError` if:
    /// - `filename` is empty or contains path separators (`InvalidFilename`)
    /// - `mime_type` is empty (`InvalidMimeType`)
    /// - the underlying storage fails (`Io`, `Unavailable`)
    fn save_text_file(&self, filename: &str, content: &str, mime_type: &str)
        -> FilesResult<SavedFile>;

    /// Saves a prepared [`TextFile`].
    fn save(&self, file: &TextFile) -> FilesResult<SavedFile> {
        self.save_text_file(&file.filename, &file.content, &file.mime_type)
    }
}

/// Builds the `mime:filename:href` hint a browser download link carries.
pub fn download_url_hint(filename: &str, href: &str) -> String {
    [DOWNLOAD_HINT_MIME_TYPE, filename, href].join(":")
}

/// Rejects filenames that are empty or could escape the target directory.
pub(crate) fn validate_filename(filename: &str) -> FilesResult<()> {
    if filename.trim().is_empty() {
        return Err(FilesError::InvalidFilename("filename cannot be empty".into()));
    }

    if filename == "." || filename == ".." {
        return Err(FilesError::InvalidFilename(format!(
            "'{}' is not a file name",
            filename
        )));
    }

    if filename.contains(['/', '\\', '\0']) {
        return Err(FilesError::InvalidFilename(format!(
            "'{}' must not contain path separators",
            filename
        )));
    }

    Ok(())
}

pub(crate) fn validate_mime_type(mime_type: &str) -> FilesResult<()> {
    if mime_type.trim().is_empty() {
        return Err(FilesError::InvalidMimeType("MIME type cannot be empty".into()));
    }
    Ok(())
}

pub(crate) fn sha256_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_bundle_uses_export_name_and_type() {
        let file = TextFile::resource_bundle("{\"result\":\"ok\"}");
        assert_eq!(file.filename, "ResourceBundle.json");
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.content, "{\"result\":\"ok\"}");
    }

    #[test]
    fn test_download_url_hint_joins_with_colons() {
        let hint = download_url_hint("ResourceBundle.json", "blob:http://localhost/abc");
        assert_eq!(hint, "text/json:ResourceBundle.json:blob:http://localhost/abc");
    }

    #[test]
    fn test_validate_filename_accepts_plain_names() {
        assert!(validate_filename("ResourceBundle.json").is_ok());
        assert!(validate_filename("bundle").is_ok());
        assert!(validate_filename(".hidden").is_ok());
    }

    #[test]
    fn test_validate_filename_rejects_empty_and_traversal() {
        assert!(matches!(
            validate_filename(""),
            Err(FilesError::InvalidFilename(msg)) if msg.contains("cannot be empty")
        ));
        assert!(matches!(
            validate_filename("   "),
            Err(FilesError::InvalidFilename(_))
        ));
        assert!(matches!(
            validate_filename(".."),
            Err(FilesError::InvalidFilename(_))
        ));
        assert!(matches!(
            validate_filename("../escape.json"),
            Err(FilesError::InvalidFilename(msg)) if msg.contains("path separators")
        ));
        assert!(matches!(
            validate_filename("dir\\file.json"),
            Err(FilesError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_validate_mime_type_rejects_blank() {
        assert!(validate_mime_type("text/plain").is_ok());
        assert!(matches!(
            validate_mime_type(" "),
            Err(FilesError::InvalidMimeType(_))
        ));
    }

    #[test]
    fn test_sha256_hex_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(sha256_hex(b"Hello, World!").len(), 64);
    }

    #[test]
    fn test_saved_file_serialises_to_json() {
        let saved = SavedFile {
            filename: "ResourceBundle.json".into(),
            location: "memory:ResourceBundle.json".into(),
            mime_type: "text/plain".into(),
            size_bytes: 2,
            sha256: sha256_hex(b"{}"),
            saved_at: Utc::now(),
        };

        let json = serde_json::to_value(&saved).expect("serialise");
        assert_eq!(json["filename"], "ResourceBundle.json");
        assert_eq!(json["size_bytes"], 2);
    }
}

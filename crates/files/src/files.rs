//! Directory-backed text file saver
//!
//! [`DirectorySaver`] is the command-line counterpart of a browser download: the exported text
//! lands in a fixed download directory under the requested filename.
//!
//! # Behaviour
//!
//! - The download directory is validated and canonicalised once, at construction
//! - Filenames are plain names only; separators and `..` are rejected so a save can never
//!   leave the download directory
//! - Saving the same filename twice replaces the earlier file, as repeated browser downloads
//!   into a fixed name would
//! - Content is written to a temporary sibling first and then renamed into place

use crate::saver::{sha256_hex, validate_filename, validate_mime_type};
use crate::{FilesError, FilesResult, SaveTextFile, SavedFile};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Saver that writes files into a download directory
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    /// Canonicalised download directory
    download_dir: PathBuf,
}

impl DirectorySaver {
    /// Creates a new `DirectorySaver` writing into `download_dir`
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidDownloadDirectory` if:
    /// - the directory does not exist or is not a directory
    /// - path canonicalisation fails
    pub fn new(download_dir: &Path) -> FilesResult<Self> {
        if !download_dir.exists() {
            return Err(FilesError::InvalidDownloadDirectory(format!(
                "Directory does not exist: {}",
                download_dir.display()
            )));
        }

        if !download_dir.is_dir() {
            return Err(FilesError::InvalidDownloadDirectory(format!(
                "Path is not a directory: {}",
                download_dir.display()
            )));
        }

        let download_dir = download_dir.canonicalize().map_err(|e| {
            FilesError::InvalidDownloadDirectory(format!(
                "Cannot canonicalize path {}: {}",
                download_dir.display(),
                e
            ))
        })?;

        Ok(Self { download_dir })
    }

    /// Creates the download directory (and parents) if needed, then builds the saver
    ///
    /// # Errors
    ///
    /// Returns `FilesError::Io` if the directory cannot be created, otherwise as [`Self::new`].
    pub fn create(download_dir: &Path) -> FilesResult<Self> {
        fs::create_dir_all(download_dir).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create download directory {}: {}",
                    download_dir.display(),
                    e
                ),
            ))
        })?;
        Self::new(download_dir)
    }

    /// Returns the canonicalised download directory
    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Returns the path a file named `filename` would be saved to
    #[must_use]
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.download_dir.join(filename)
    }
}

impl SaveTextFile for DirectorySaver {
    fn save_text_file(
        &self,
        filename: &str,
        content: &str,
        mime_type: &str,
    ) -> FilesResult<SavedFile> {
        validate_filename(filename)?;
        validate_mime_type(mime_type)?;

        let target = self.target_path(filename);
        let staging = self.download_dir.join(format!(".{}.part", filename));

        fs::write(&staging, content.as_bytes()).map_err(|e| {
            FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write file to {}: {}", staging.display(), e),
            ))
        })?;

        if let Err(e) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(FilesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to move file into {}: {}", target.display(), e),
            )));
        }

        tracing::debug!("saved {} ({} bytes)", target.display(), content.len());

        Ok(SavedFile {
            filename: filename.to_owned(),
            location: target.display().to_string(),
            mime_type: mime_type.to_owned(),
            size_bytes: content.len() as u64,
            sha256: sha256_hex(content.as_bytes()),
            saved_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TextFile, EXPORT_FILENAME};
    use tempfile::TempDir;

    #[test]
    fn test_directory_saver_new_success() {
        let temp = TempDir::new().unwrap();

        let saver = DirectorySaver::new(temp.path()).unwrap();

        assert_eq!(saver.download_dir(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_directory_saver_dir_not_exists() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("non-existent");

        let saver = DirectorySaver::new(&missing);

        assert!(matches!(
            saver,
            Err(FilesError::InvalidDownloadDirectory(_))
        ));
    }

    #[test]
    fn test_directory_saver_dir_not_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        let saver = DirectorySaver::new(&file);

        assert!(matches!(
            saver,
            Err(FilesError::InvalidDownloadDirectory(msg)) if msg.contains("not a directory")
        ));
    }

    #[test]
    fn test_directory_saver_create_makes_nested_dirs() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("downloads").join("bundles");

        let saver = DirectorySaver::create(&nested).unwrap();

        assert!(nested.is_dir());
        assert!(saver.download_dir().ends_with("bundles"));
    }

    #[test]
    fn test_save_text_file_writes_content() {
        let temp = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp.path()).unwrap();

        let saved = saver
            .save_text_file(EXPORT_FILENAME, "{\"result\":\"ok\"}", "text/plain")
            .unwrap();

        let written = fs::read_to_string(temp.path().join(EXPORT_FILENAME)).unwrap();
        assert_eq!(written, "{\"result\":\"ok\"}");
        assert_eq!(saved.filename, "ResourceBundle.json");
        assert_eq!(saved.mime_type, "text/plain");
        assert_eq!(saved.size_bytes, 15);
        assert_eq!(saved.sha256.len(), 64);
        assert!(saved.location.ends_with("ResourceBundle.json"));
    }

    #[test]
    fn test_save_overwrites_previous_download() {
        let temp = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp.path()).unwrap();

        let first = saver.save(&TextFile::resource_bundle("first")).unwrap();
        let second = saver.save(&TextFile::resource_bundle("second")).unwrap();

        let written = fs::read_to_string(temp.path().join(EXPORT_FILENAME)).unwrap();
        assert_eq!(written, "second");
        assert_ne!(first.sha256, second.sha256);
    }

    #[test]
    fn test_save_leaves_no_staging_file() {
        let temp = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp.path()).unwrap();

        saver.save(&TextFile::resource_bundle("{}")).unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ResourceBundle.json".to_string()]);
    }

    #[test]
    fn test_save_rejects_traversal_filename() {
        let temp = TempDir::new().unwrap();
        let downloads = temp.path().join("downloads");
        let saver = DirectorySaver::create(&downloads).unwrap();

        let result = saver.save_text_file("../escape.json", "{}", "text/plain");

        assert!(matches!(result, Err(FilesError::InvalidFilename(_))));
        assert!(!temp.path().join("escape.json").exists());
    }

    #[test]
    fn test_save_rejects_blank_mime_type() {
        let temp = TempDir::new().unwrap();
        let saver = DirectorySaver::new(temp.path()).unwrap();

        let result = saver.save_text_file(EXPORT_FILENAME, "{}", "");

        assert!(matches!(result, Err(FilesError::InvalidMimeType(_))));
        assert!(!temp.path().join(EXPORT_FILENAME).exists());
    }
}

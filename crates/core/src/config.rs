//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the form services. Binaries read environment variables in `main` and hand the raw
//! values to the `*_from_env_value` helpers here; nothing in the core reads the environment
//! while a form is being edited or submitted.

use crate::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_DOWNLOAD_DIR, DEFAULT_SUBMIT_TIMEOUT_SECS, SUBMIT_PATH,
};
use crate::{FormError, FormResult};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Form configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct FormConfig {
    backend_url: Url,
    download_dir: PathBuf,
    submit_timeout: Duration,
}

impl FormConfig {
    /// Create a new `FormConfig`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidBackendUrl` if the URL is not `http` or `https`, and
    /// `FormError::InvalidInput` if the timeout is zero.
    pub fn new(
        backend_url: Url,
        download_dir: PathBuf,
        submit_timeout: Duration,
    ) -> FormResult<Self> {
        validate_backend_url(&backend_url)?;

        if submit_timeout.is_zero() {
            return Err(FormError::InvalidInput(
                "submit timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            backend_url,
            download_dir,
            submit_timeout,
        })
    }

    /// Build a config from raw environment values, applying defaults for missing ones.
    pub fn from_env_values(
        backend_url: Option<String>,
        download_dir: Option<String>,
        submit_timeout_secs: Option<String>,
    ) -> FormResult<Self> {
        Self::new(
            backend_url_from_env_value(backend_url)?,
            download_dir_from_env_value(download_dir),
            submit_timeout_from_env_value(submit_timeout_secs)?,
        )
    }

    pub fn backend_url(&self) -> &Url {
        &self.backend_url
    }

    /// Full URL of the conversion endpoint.
    ///
    /// `SUBMIT_PATH` is absolute, so any path on the backend URL is replaced rather than
    /// extended, the same way a page-relative `/submit` resolves against its origin.
    pub fn submit_url(&self) -> FormResult<Url> {
        self.backend_url
            .join(SUBMIT_PATH)
            .map_err(|e| FormError::InvalidBackendUrl(e.to_string()))
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn submit_timeout(&self) -> Duration {
        self.submit_timeout
    }

    /// Returns a copy with the backend URL replaced.
    pub fn with_backend_url(mut self, backend_url: Url) -> FormResult<Self> {
        validate_backend_url(&backend_url)?;
        self.backend_url = backend_url;
        Ok(self)
    }

    /// Returns a copy with the download directory replaced.
    pub fn with_download_dir(mut self, download_dir: PathBuf) -> Self {
        self.download_dir = download_dir;
        self
    }
}

fn validate_backend_url(url: &Url) -> FormResult<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FormError::InvalidBackendUrl(format!(
            "unsupported scheme '{}' (expected http or https)",
            other
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the backend base URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_BACKEND_URL`].
pub fn backend_url_from_env_value(value: Option<String>) -> FormResult<Url> {
    let raw = non_blank(value).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let url = Url::parse(&raw)
        .map_err(|e| FormError::InvalidBackendUrl(format!("'{}': {}", raw, e)))?;
    validate_backend_url(&url)?;
    Ok(url)
}

/// Resolve the download directory from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DOWNLOAD_DIR`].
pub fn download_dir_from_env_value(value: Option<String>) -> PathBuf {
    PathBuf::from(non_blank(value).unwrap_or_else(|| DEFAULT_DOWNLOAD_DIR.to_string()))
}

/// Parse the submit timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_SUBMIT_TIMEOUT_SECS`].
pub fn submit_timeout_from_env_value(value: Option<String>) -> FormResult<Duration> {
    let secs = match non_blank(value) {
        Some(v) => v.parse::<u64>().map_err(|e| {
            FormError::InvalidInput(format!("submit timeout '{}' is not a number: {}", v, e))
        })?,
        None => DEFAULT_SUBMIT_TIMEOUT_SECS,
    };

    if secs == 0 {
        return Err(FormError::InvalidInput(
            "submit timeout must be greater than zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

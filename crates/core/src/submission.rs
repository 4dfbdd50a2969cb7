//! Submission and export flow.
//!
//! A prepared [`Request`] is posted to the conversion backend once. A successful JSON response
//! is re-serialised to text and handed to a [`SaveTextFile`] implementation as
//! `ResourceBundle.json`.
//!
//! There is no retry. Failures are logged and returned to the caller.

use crate::config::FormConfig;
use crate::request::Request;
use crate::{FormError, FormResult};
use async_trait::async_trait;
use nlp2fhir_files::{SaveTextFile, SavedFile, TextFile};
use reqwest::Url;

/// Longest slice of an error response body kept in [`FormError::BackendStatus`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// A conversion backend that accepts a request and answers with JSON.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends `request` and returns the parsed JSON response.
    async fn submit(&self, request: &Request) -> FormResult<serde_json::Value>;
}

/// Backend reached over HTTP at `POST {backend_url}/submit`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    submit_url: Url,
}

impl HttpBackend {
    /// Builds a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `FormError::HttpClient` if the HTTP client cannot be built, or
    /// `FormError::InvalidBackendUrl` if the submit URL cannot be derived.
    pub fn new(config: &FormConfig) -> FormResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.submit_timeout())
            .build()
            .map_err(FormError::HttpClient)?;

        Ok(Self {
            client,
            submit_url: config.submit_url()?,
        })
    }

    pub fn submit_url(&self) -> &Url {
        &self.submit_url
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn submit(&self, request: &Request) -> FormResult<serde_json::Value> {
        let response = self
            .client
            .post(self.submit_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|source| FormError::BackendUnreachable {
                url: self.submit_url.to_string(),
                source,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(FormError::ResponseRead)?;

        if !status.is_success() {
            return Err(FormError::BackendStatus {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&text).map_err(FormError::InvalidResponse)
    }
}

/// Converts a backend response into the file offered to the user.
///
/// The JSON is written compactly with its key order preserved.
pub fn export_bundle(response: &serde_json::Value) -> FormResult<TextFile> {
    let text = serde_json::to_string(response).map_err(FormError::Serialization)?;
    Ok(TextFile::resource_bundle(text))
}

/// Submits an already prepared request and saves the response.
///
/// Callers are expected to have refreshed labels first (see
/// [`crate::FormController::prepare_submission`]).
///
/// # Errors
///
/// Returns the backend error unchanged (after logging it), or `FormError::Export` if the
/// saver fails.
pub async fn submit_and_export(
    backend: &dyn Backend,
    request: &Request,
    saver: &dyn SaveTextFile,
) -> FormResult<SavedFile> {
    tracing::info!("submitting request with {} section(s)", request.len());

    let response = match backend.submit(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("submission failed: {}", e);
            return Err(e);
        }
    };

    let file = export_bundle(&response)?;
    let saved = saver.save(&file)?;

    tracing::info!("saved {} ({} bytes)", saved.location, saved.size_bytes);
    Ok(saved)
}

//! Error type of the REST API and its mapping to HTTP responses.

use crate::models::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nlp2fhir_core::FormError;
use nlp2fhir_files::FilesError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("form {0} not found")]
    FormNotFound(Uuid),
    #[error("section code {0} is not registered")]
    UnknownSectionCode(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("failed to export bundle: {0}")]
    Files(#[from] FilesError),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::FormNotFound(_) | ApiError::UnknownSectionCode(_) => StatusCode::NOT_FOUND,
            ApiError::Form(err) => match err {
                FormError::SectionNotFound(_) => StatusCode::NOT_FOUND,
                FormError::InvalidInput(_)
                | FormError::Deserialization(_)
                | FormError::YamlDeserialization(_) => StatusCode::BAD_REQUEST,
                FormError::BackendUnreachable { .. }
                | FormError::BackendStatus { .. }
                | FormError::InvalidResponse(_)
                | FormError::ResponseRead(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Files(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the response path should log this error.
    ///
    /// Backend failures are logged once by `submit_and_export`.
    fn needs_logging(&self) -> bool {
        self.status().is_server_error() && self.status() != StatusCode::BAD_GATEWAY
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.needs_logging() {
            tracing::error!("request failed: {:?}", self);
        }

        (
            status,
            Json(ErrorRes {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

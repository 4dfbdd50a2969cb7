//! # NLP2FHIR API
//!
//! REST API for the NLP2FHIR section form.
//!
//! Handles:
//! - Form sessions, each backed by one `FormController`
//! - HTTP endpoints with axum
//! - OpenAPI documentation with utoipa
//! - REST-specific concerns (JSON bodies, attachments, CORS)
//!
//! Uses `nlp2fhir-core` for the form model and submission flow.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, FormSessions};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_sections,
        handlers::get_section,
        handlers::create_form,
        handlers::get_form,
        handlers::delete_form,
        handlers::add_section,
        handlers::update_section,
        handlers::remove_section,
        handlers::reset_form,
        handlers::generate,
    ),
    components(schemas(
        models::HealthRes,
        models::SectionOption,
        models::SectionView,
        models::FormView,
        models::UpdateSectionReq,
        models::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/sections", get(handlers::list_sections))
        .route("/sections/:code", get(handlers::get_section))
        .route("/forms", post(handlers::create_form))
        .route(
            "/forms/:id",
            get(handlers::get_form).delete(handlers::delete_form),
        )
        .route("/forms/:id/sections", post(handlers::add_section))
        .route(
            "/forms/:id/sections/:index",
            put(handlers::update_section).delete(handlers::remove_section),
        )
        .route("/forms/:id/reset", post(handlers::reset_form))
        .route("/forms/:id/generate", post(handlers::generate))
        .route("/api-docs/openapi.json", get(handlers::openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! REST handlers for the section form.
//!
//! Each form session owns one `FormController`. Handlers translate HTTP calls into the
//! controller's event handlers and answer with the resulting [`FormView`], so a UI can re-render
//! from every response.

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
};
use nlp2fhir_core::{submit_and_export, FormError, SectionRegistry};
use nlp2fhir_files::{download_url_hint, MemorySaver, TextFile};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{ErrorRes, FormView, HealthRes, SectionOption, UpdateSectionReq};
use crate::state::AppState;
use crate::ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Also reports the conversion endpoint so operators can see where submissions go.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    let submit_url = state
        .config
        .submit_url()
        .map(|url| url.to_string())
        .unwrap_or_default();

    Json(HealthRes {
        ok: true,
        message: "NLP2FHIR form API is alive".into(),
        submit_url,
    })
}

#[utoipa::path(
    get,
    path = "/sections",
    responses(
        (status = 200, description = "Every registered section code", body = [SectionOption])
    )
)]
/// List the section registry, in registry order
#[axum::debug_handler]
pub async fn list_sections() -> Json<Vec<SectionOption>> {
    Json(SectionOption::all())
}

#[utoipa::path(
    get,
    path = "/sections/{code}",
    params(("code" = String, Path, description = "Section code, e.g. 8716-3")),
    responses(
        (status = 200, description = "Registered section", body = SectionOption),
        (status = 404, description = "Code is not registered", body = ErrorRes)
    )
)]
/// Look up the label of one section code
#[axum::debug_handler]
pub async fn get_section(Path(code): Path<String>) -> ApiResult<Json<SectionOption>> {
    let label = SectionRegistry::lookup(&code)
        .ok_or_else(|| ApiError::UnknownSectionCode(code.clone()))?;
    Ok(Json(SectionOption {
        code,
        label: label.to_owned(),
    }))
}

#[utoipa::path(
    post,
    path = "/forms",
    responses(
        (status = 201, description = "Form session opened", body = FormView)
    )
)]
/// Open a new, empty form session
#[axum::debug_handler]
pub async fn create_form(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<FormView>)> {
    let id = state.forms.create()?;
    let view = state
        .forms
        .with_form(id, |form| Ok(FormView::new(id, form.request())))?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/forms/{id}",
    params(("id" = String, Path, description = "Form session id")),
    responses(
        (status = 200, description = "Current form state", body = FormView),
        (status = 404, description = "Unknown form", body = ErrorRes)
    )
)]
/// Read the current state of a form
#[axum::debug_handler]
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FormView>> {
    let view = state
        .forms
        .with_form(id, |form| Ok(FormView::new(id, form.request())))?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/forms/{id}",
    params(("id" = String, Path, description = "Form session id")),
    responses(
        (status = 204, description = "Form session closed"),
        (status = 404, description = "Unknown form", body = ErrorRes)
    )
)]
/// Close a form session and discard its sections
#[axum::debug_handler]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.forms.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/forms/{id}/sections",
    params(("id" = String, Path, description = "Form session id")),
    responses(
        (status = 201, description = "Default section appended", body = FormView),
        (status = 404, description = "Unknown form", body = ErrorRes)
    )
)]
/// Append a default section to the form
#[axum::debug_handler]
pub async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<FormView>)> {
    let view = state.forms.with_form(id, |form| {
        form.add_section();
        Ok(FormView::new(id, form.request()))
    })?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    put,
    path = "/forms/{id}/sections/{index}",
    params(
        ("id" = String, Path, description = "Form session id"),
        ("index" = usize, Path, description = "Zero-based section position")
    ),
    request_body = UpdateSectionReq,
    responses(
        (status = 200, description = "Section updated", body = FormView),
        (status = 404, description = "Unknown form or section", body = ErrorRes)
    )
)]
/// Change the code and/or body of one section
///
/// A new code re-derives the section label. Unregistered codes are accepted and leave the
/// label empty.
#[axum::debug_handler]
pub async fn update_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<UpdateSectionReq>,
) -> ApiResult<Json<FormView>> {
    let view = state.forms.with_form(id, |form| {
        if form.request().section(index).is_none() {
            return Err(FormError::SectionNotFound(index).into());
        }
        if let Some(code) = req.code {
            form.set_code(index, code)?;
        }
        if let Some(body) = req.body {
            form.set_body(index, body)?;
        }
        Ok(FormView::new(id, form.request()))
    })?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/forms/{id}/sections/{index}",
    params(
        ("id" = String, Path, description = "Form session id"),
        ("index" = usize, Path, description = "Zero-based section position")
    ),
    responses(
        (status = 200, description = "Section removed; unchanged form for an out-of-range index", body = FormView),
        (status = 404, description = "Unknown form", body = ErrorRes)
    )
)]
/// Remove one section, shifting later sections left
#[axum::debug_handler]
pub async fn remove_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> ApiResult<Json<FormView>> {
    let view = state.forms.with_form(id, |form| {
        form.remove_section(index);
        Ok(FormView::new(id, form.request()))
    })?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/forms/{id}/reset",
    params(("id" = String, Path, description = "Form session id")),
    responses(
        (status = 200, description = "All sections discarded", body = FormView),
        (status = 404, description = "Unknown form", body = ErrorRes)
    )
)]
/// Discard every section of the form
#[axum::debug_handler]
pub async fn reset_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<FormView>> {
    let view = state.forms.with_form(id, |form| {
        form.reset();
        Ok(FormView::new(id, form.request()))
    })?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/forms/{id}/generate",
    params(("id" = String, Path, description = "Form session id")),
    responses(
        (status = 200, description = "ResourceBundle.json attachment", content_type = "text/plain", body = String),
        (status = 404, description = "Unknown form", body = ErrorRes),
        (status = 502, description = "Conversion backend failed", body = ErrorRes)
    )
)]
/// Submit the form to the conversion backend and download the result
///
/// Labels are refreshed from their codes, the form is posted to the backend's `/submit`
/// endpoint, and the JSON reply is returned as a `ResourceBundle.json` attachment.
/// The form itself is left unchanged.
///
/// The `X-Download-Url` header carries the `text/json:ResourceBundle.json:<href>` hint for
/// drag-out downloads.
#[axum::debug_handler]
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let payload = state
        .forms
        .with_form(id, |form| Ok(form.prepare_submission()))?;

    let saver = MemorySaver::new();
    submit_and_export(state.backend.as_ref(), &payload, &saver).await?;

    let file = saver
        .take_last()?
        .ok_or_else(|| ApiError::Internal("export produced no file".into()))?;
    let href = format!("/forms/{}/generate", id);
    Ok(attachment(file, &href))
}

/// Serve the OpenAPI document
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

const X_DOWNLOAD_URL: HeaderName = HeaderName::from_static("x-download-url");

fn attachment(file: TextFile, href: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    let download_url = download_url_hint(&file.filename, href);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
            (X_DOWNLOAD_URL, download_url),
        ],
        file.content,
    )
        .into_response()
}

//! Form controller.
//!
//! [`FormController`] is the explicit state container behind a section form. A UI layer keeps
//! one per form session, calls the event handlers below when the user acts, and re-renders from
//! [`FormController::request`] afterwards.

use crate::render::render_request;
use crate::request::Request;
use crate::section::Section;
use crate::submission::{submit_and_export, Backend};
use crate::{FormError, FormResult};
use nlp2fhir_files::{SaveTextFile, SavedFile};

/// State and event handlers for one section form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormController {
    request: Request,
}

impl FormController {
    /// Creates a controller with an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller around an existing request, e.g. a loaded draft.
    pub fn from_request(request: Request) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Appends a default section and returns its index.
    pub fn add_section(&mut self) -> usize {
        let index = self.request.add_section();
        tracing::debug!("added section {}", index);
        index
    }

    /// Removes the section at `index`; an invalid index is ignored.
    pub fn remove_section(&mut self, index: usize) -> Option<Section> {
        let removed = self.request.remove_section(index);
        if removed.is_some() {
            tracing::debug!("removed section {}", index);
        }
        removed
    }

    /// Changes the code of the section at `index`, re-deriving its label.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SectionNotFound` if there is no section at `index`.
    pub fn set_code(&mut self, index: usize, code: impl Into<String>) -> FormResult<&Section> {
        let section = self
            .request
            .section_mut(index)
            .ok_or(FormError::SectionNotFound(index))?;
        section.set_code(code);
        if !section.is_known() {
            tracing::debug!("section {} set to unregistered code {}", index, section.code());
        }
        Ok(section)
    }

    /// Replaces the body text of the section at `index`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SectionNotFound` if there is no section at `index`.
    pub fn set_body(&mut self, index: usize, body: impl Into<String>) -> FormResult<&Section> {
        let section = self
            .request
            .section_mut(index)
            .ok_or(FormError::SectionNotFound(index))?;
        section.set_body(body);
        Ok(section)
    }

    /// Discards every section.
    pub fn reset(&mut self) {
        self.request.clear();
    }

    /// Refreshes every label from its code and returns a snapshot to submit.
    ///
    /// Labels can be stale when sections came from a draft file or an API client, so this
    /// runs before every submission.
    pub fn prepare_submission(&mut self) -> Request {
        let refreshed = self.request.sync_labels();
        if refreshed > 0 {
            tracing::debug!("refreshed {} stale section label(s)", refreshed);
        }
        self.request.clone()
    }

    /// Prepares, submits and saves the backend response in one call.
    ///
    /// Only for callers that own the controller for the whole submission. Shared owners
    /// should call [`Self::prepare_submission`] and then [`submit_and_export`] without holding
    /// their lock across the await.
    pub async fn generate(
        &mut self,
        backend: &dyn Backend,
        saver: &dyn SaveTextFile,
    ) -> FormResult<SavedFile> {
        let payload = self.prepare_submission();
        submit_and_export(backend, &payload, saver).await
    }

    /// Text rendering of the current request.
    pub fn render(&self) -> String {
        render_request(&self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::stub::StubBackend;
    use nlp2fhir_files::MemorySaver;

    #[test]
    fn starts_empty() {
        let form = FormController::new();
        assert!(form.request().is_empty());
    }

    #[test]
    fn handlers_edit_request_in_place() {
        let mut form = FormController::new();
        let first = form.add_section();
        let second = form.add_section();

        form.set_code(second, "8716-3").unwrap();
        form.set_body(first, "Cough for three days").unwrap();

        let sections = form.request().sections();
        assert_eq!(sections[0].code(), "10154-3");
        assert_eq!(sections[0].body(), "Cough for three days");
        assert_eq!(sections[1].label(), Some("Vital signs"));
    }

    #[test]
    fn set_code_on_missing_index_is_an_error() {
        let mut form = FormController::new();
        assert!(matches!(
            form.set_code(0, "8716-3"),
            Err(FormError::SectionNotFound(0))
        ));
        assert!(matches!(
            form.set_body(4, "x"),
            Err(FormError::SectionNotFound(4))
        ));
    }

    #[test]
    fn remove_ignores_invalid_index() {
        let mut form = FormController::new();
        form.add_section();

        assert!(form.remove_section(1).is_none());
        assert_eq!(form.request().len(), 1);
        assert!(form.remove_section(0).is_some());
        assert!(form.request().is_empty());
    }

    #[test]
    fn reset_discards_sections() {
        let mut form = FormController::new();
        form.add_section();
        form.add_section();

        form.reset();

        assert!(form.request().is_empty());
    }

    #[test]
    fn prepare_submission_refreshes_stale_labels() {
        let draft = Request::from_json(
            r#"{"sections":[{"id":"61149-1","name":"Subjective Narrative","body":"x"}]}"#,
        )
        .unwrap();
        let mut form = FormController::from_request(draft);

        let payload = form.prepare_submission();

        assert_eq!(
            payload.section(0).unwrap().label(),
            Some("Objective Narrative")
        );
        assert_eq!(form.request(), &payload);
    }

    #[tokio::test]
    async fn generate_submits_synced_payload_and_saves_reply() {
        let mut form = FormController::new();
        let a = form.add_section();
        form.set_body(a, "A").unwrap();
        let b = form.add_section();
        form.set_code(b, "8716-3").unwrap();
        form.set_body(b, "B").unwrap();

        let backend = StubBackend::replying(serde_json::json!({"result": "ok"}));
        let saver = MemorySaver::new();

        let saved = form.generate(&backend, &saver).await.unwrap();

        assert_eq!(saved.filename, "ResourceBundle.json");
        let file = saver.take_last().unwrap().expect("file saved");
        assert_eq!(file.content, r#"{"result":"ok"}"#);

        let sent = backend.received();
        assert_eq!(sent.len(), 1);
        let labels: Vec<Option<&str>> = sent[0].sections().iter().map(Section::label).collect();
        assert_eq!(
            labels,
            vec![Some("Chief complaint Narrative - Reported"), Some("Vital signs")]
        );
    }

    #[tokio::test]
    async fn generate_keeps_form_state_on_failure() {
        let mut form = FormController::new();
        form.add_section();
        let backend = StubBackend::failing();
        let saver = MemorySaver::new();

        assert!(form.generate(&backend, &saver).await.is_err());
        assert_eq!(form.request().len(), 1);
    }

    #[test]
    fn render_lists_sections() {
        let mut form = FormController::new();
        form.add_section();
        assert!(form.render().contains("[10154-3] Chief complaint Narrative - Reported"));
    }
}

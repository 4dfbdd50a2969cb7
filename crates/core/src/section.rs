//! Section domain model.
//!
//! A section is one clinical narrative segment chosen by the user: a registry code, the label
//! derived from it, and free-text body content.
//!
//! The wire shape uses the field names the conversion backend expects:
//!
//! ```json
//! { "id": "8716-3", "name": "Vital signs", "body": "BP 120/80" }
//! ```
//!
//! `name` is omitted when the code has no registry label.

use crate::registry::{SectionRegistry, DEFAULT_SECTION_CODE};
use serde::{Deserialize, Serialize};

/// One clinical narrative section.
///
/// The label is derived from the code. It changes only through [`Section::set_code`] or
/// [`Section::sync_label`]; there is no setter for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Registry code of the section.
    #[serde(rename = "id")]
    code: String,

    /// Display label for `code`; `None` for unknown codes.
    ///
    /// Values deserialized from drafts are taken as-is and may be stale until re-synced.
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,

    /// Free-text narrative content.
    #[serde(default)]
    body: String,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    /// Creates a section with the default code, its label and an empty body.
    pub fn new() -> Self {
        Self::with_code(DEFAULT_SECTION_CODE)
    }

    /// Creates a section for `code` with an empty body.
    pub fn with_code(code: impl Into<String>) -> Self {
        let code = code.into();
        let label = SectionRegistry::lookup(&code).map(str::to_owned);
        Self {
            code,
            label,
            body: String::new(),
        }
    }

    /// Sets the code and re-derives the label in the same call.
    ///
    /// Unknown codes are accepted; the section then has no label.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.label = SectionRegistry::lookup(&self.code).map(str::to_owned);
    }

    /// Re-derives the label from the current code.
    ///
    /// Returns `true` if the label changed.
    pub fn sync_label(&mut self) -> bool {
        let fresh = SectionRegistry::lookup(&self.code);
        if self.label.as_deref() == fresh {
            return false;
        }
        self.label = fresh.map(str::to_owned);
        true
    }

    /// Whether the stored label matches the registry label for the current code.
    pub fn is_label_current(&self) -> bool {
        self.label.as_deref() == SectionRegistry::lookup(&self.code)
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the code is present in the registry.
    pub fn is_known(&self) -> bool {
        SectionRegistry::contains(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_section_uses_default_code() {
        let section = Section::new();
        assert_eq!(section.code(), "10154-3");
        assert_eq!(
            section.label(),
            Some("Chief complaint Narrative - Reported")
        );
        assert_eq!(section.body(), "");
        assert_eq!(section, Section::default());
    }

    #[test]
    fn set_code_updates_code_and_label_together() {
        let mut section = Section::new();
        section.set_code("61149-1");
        assert_eq!(section.code(), "61149-1");
        assert_eq!(section.label(), Some("Objective Narrative"));
        assert!(section.is_label_current());
    }

    #[test]
    fn set_code_to_unknown_clears_label() {
        let mut section = Section::new();
        section.set_body("kept");
        section.set_code("0000-0");
        assert_eq!(section.code(), "0000-0");
        assert_eq!(section.label(), None);
        assert!(!section.is_known());
        assert_eq!(section.body(), "kept");
    }

    #[test]
    fn serialises_with_wire_field_names() {
        let mut section = Section::with_code("8716-3");
        section.set_body("BP 120/80");

        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(
            json,
            r#"{"id":"8716-3","name":"Vital signs","body":"BP 120/80"}"#
        );
    }

    #[test]
    fn unknown_code_omits_name_on_the_wire() {
        let section = Section::with_code("nope");
        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(json, r#"{"id":"nope","body":""}"#);
    }

    #[test]
    fn deserialised_stale_label_is_fixed_by_sync() {
        let mut section: Section =
            serde_json::from_str(r#"{"id":"8716-3","name":"Objective Narrative","body":"B"}"#)
                .unwrap();
        assert!(!section.is_label_current());

        assert!(section.sync_label());
        assert_eq!(section.label(), Some("Vital signs"));
        assert!(!section.sync_label());
    }

    #[test]
    fn deserialise_defaults_missing_name_and_body() {
        let section: Section = serde_json::from_str(r#"{"id":"51848-0"}"#).unwrap();
        assert_eq!(section.label(), None);
        assert_eq!(section.body(), "");
    }
}

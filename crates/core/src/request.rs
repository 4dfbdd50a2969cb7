//! The ordered list of sections a user submits in one conversion job.

use crate::section::Section;
use crate::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ordered collection of [`Section`]s.
///
/// Order is the order sections were added, minus removals. Duplicate codes are allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    sections: Vec<Section>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new default section and returns its index.
    pub fn add_section(&mut self) -> usize {
        self.push(Section::new())
    }

    /// Appends an existing section and returns its index.
    pub fn push(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Removes the section at `index`, shifting later sections left.
    ///
    /// An out-of-range index leaves the request unchanged and returns `None`.
    pub fn remove_section(&mut self, index: usize) -> Option<Section> {
        if index >= self.sections.len() {
            tracing::debug!(
                "ignoring removal of section {} from request of {}",
                index,
                self.sections.len()
            );
            return None;
        }
        Some(self.sections.remove(index))
    }

    /// Re-derives every section label from its code.
    ///
    /// Returns how many labels changed.
    pub fn sync_labels(&mut self) -> usize {
        self.sections
            .iter_mut()
            .map(Section::sync_label)
            .filter(|changed| *changed)
            .count()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Removes every section.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Serialises the request as the JSON payload sent to the backend.
    pub fn to_json(&self) -> FormResult<String> {
        serde_json::to_string(self).map_err(FormError::Serialization)
    }

    /// Parses a JSON draft (`{"sections": [...]}`).
    ///
    /// Labels are taken as written; call [`Request::sync_labels`] to refresh them.
    pub fn from_json(text: &str) -> FormResult<Self> {
        serde_json::from_str(text).map_err(FormError::Deserialization)
    }

    /// Parses a YAML draft with the same shape as the JSON payload.
    pub fn from_yaml(text: &str) -> FormResult<Self> {
        serde_yaml::from_str(text).map_err(FormError::YamlDeserialization)
    }

    /// Reads a draft file, choosing the format from its extension (`.json`, `.yaml`, `.yml`).
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` for any other extension, `FormError::FileRead` if the
    /// file cannot be read, and the matching deserialization error if it does not parse.
    pub fn from_path(path: &Path) -> FormResult<Self> {
        let parse: fn(&str) -> FormResult<Self> =
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => Self::from_json,
                Some("yaml") | Some("yml") => Self::from_yaml,
                _ => {
                    return Err(FormError::InvalidInput(format!(
                        "unsupported draft format for {} (expected .json, .yaml or .yml)",
                        path.display()
                    )))
                }
            };

        let text = std::fs::read_to_string(path).map_err(FormError::FileRead)?;
        parse(&text)
    }
}

impl FromIterator<Section> for Request {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

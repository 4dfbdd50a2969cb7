//! Request and response bodies of the REST API.

use nlp2fhir_core::{Request, SectionRegistry};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Conversion endpoint submissions are sent to
    pub submit_url: String,
}

/// One entry of the section registry, for option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionOption {
    pub code: String,
    pub label: String,
}

impl SectionOption {
    pub fn all() -> Vec<Self> {
        SectionRegistry::entries()
            .map(|(code, label)| Self {
                code: code.to_owned(),
                label: label.to_owned(),
            })
            .collect()
    }
}

/// A section as shown to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionView {
    /// Position in the form, used to address the section in later calls
    pub index: usize,
    pub code: String,
    /// Registry label; absent for unregistered codes
    pub label: Option<String>,
    pub body: String,
}

/// Current state of one form session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormView {
    pub id: String,
    pub sections: Vec<SectionView>,
}

impl FormView {
    pub fn new(id: Uuid, request: &Request) -> Self {
        Self {
            id: id.to_string(),
            sections: request
                .sections()
                .iter()
                .enumerate()
                .map(|(index, section)| SectionView {
                    index,
                    code: section.code().to_owned(),
                    label: section.label().map(str::to_owned),
                    body: section.body().to_owned(),
                })
                .collect(),
        }
    }
}

/// Edit of one section. Fields left out are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSectionReq {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

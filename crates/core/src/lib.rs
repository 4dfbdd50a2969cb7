//! # NLP2FHIR Core
//!
//! Core logic for the NLP2FHIR section form.
//!
//! This crate contains the form model and the submission flow:
//! - The static section code registry (`registry`)
//! - Sections and the ordered request a user builds (`section`, `request`)
//! - The form controller with its event handlers (`controller`)
//! - Submission to the conversion backend and export of the returned bundle (`submission`)
//! - Plain-text renderers (`render`)
//!
//! **No surface concerns**: HTTP servers and the command line belong in `nlp2fhir-api` and
//! `nlp2fhir-cli`. Where exported files end up is decided by the `SaveTextFile` implementation
//! the caller passes in.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod registry;
pub mod render;
pub mod request;
pub mod section;
pub mod submission;

pub use config::FormConfig;
pub use constants::{DEFAULT_BACKEND_URL, DEFAULT_DOWNLOAD_DIR, SUBMIT_PATH};
pub use controller::FormController;
pub use error::{FormError, FormResult};
pub use registry::{SectionRegistry, DEFAULT_SECTION_CODE};
pub use request::Request;
pub use section::Section;
pub use submission::{submit_and_export, Backend, HttpBackend};

pub use nlp2fhir_files as files;

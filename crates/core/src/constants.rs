//! Constants used throughout the NLP2FHIR core crate.
//!
//! Endpoint paths and configuration defaults live here so the CLI, the REST API and the
//! tests agree on them.

/// Path of the conversion endpoint on the backend.
pub const SUBMIT_PATH: &str = "/submit";

/// Backend base URL used when no explicit URL is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Directory exports are saved to when no explicit directory is configured.
pub const DEFAULT_DOWNLOAD_DIR: &str = ".";

/// Seconds to wait for the backend before giving up on a submission.
///
/// Conversion runs the whole NLP pipeline over every section in one request, which can take
/// several minutes on long notes. Set `NLP2FHIR_SUBMIT_TIMEOUT_SECS` to tighten it.
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 600;

/// Placeholder shown for a section whose code has no registry label.
pub const UNKNOWN_SECTION_LABEL: &str = "(unknown section)";

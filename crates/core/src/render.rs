//! Plain-text rendering of form state.
//!
//! Renderers are pure functions of the state they are given.

use crate::constants::UNKNOWN_SECTION_LABEL;
use crate::registry::SectionRegistry;
use crate::request::Request;
use std::fmt::Write;

/// Renders the request as a numbered list with indented bodies.
///
/// ```text
/// 1. [10154-3] Chief complaint Narrative - Reported
///    Cough for three days
/// 2. [0000-0] (unknown section)
///    (empty)
/// ```
pub fn render_request(request: &Request) -> String {
    if request.is_empty() {
        return "No sections.\n".to_string();
    }

    let mut out = String::new();
    for (i, section) in request.sections().iter().enumerate() {
        let label = section.label().unwrap_or(UNKNOWN_SECTION_LABEL);
        let _ = writeln!(out, "{}. [{}] {}", i + 1, section.code(), label);

        if section.body().trim().is_empty() {
            out.push_str("   (empty)\n");
        } else {
            for line in section.body().lines() {
                let _ = writeln!(out, "   {}", line);
            }
        }
    }
    out
}

/// Renders every registry entry as `code  label`, codes padded to a common width.
pub fn render_section_options() -> String {
    let width = SectionRegistry::entries()
        .map(|(code, _)| code.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (code, label) in SectionRegistry::entries() {
        let _ = writeln!(out, "{:<width$}  {}", code, label, width = width);
    }
    out
}

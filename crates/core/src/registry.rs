//! Section code registry.
//!
//! A fixed table mapping LOINC-style section codes to the display labels shown to users. The
//! table is compiled into the binary and never changes at runtime.
//!
//! Entries are kept in byte order of their codes so lookups can binary-search the table; a
//! test guards that ordering.

/// Code a new section starts with.
pub const DEFAULT_SECTION_CODE: &str = "10154-3";

/// Registry entries, sorted by code.
static SECTION_CODES: &[(&str, &str)] = &[
    ("10154-3", "Chief complaint Narrative - Reported"),
    ("10157-6", "History of family member diseases Narrative"),
    ("10160-0", "History of medication use Narrative"),
    ("10164-2", "History of present illness Narrative"),
    ("10183-2", "Hospital discharge medications Narrative"),
    ("10184-0", "Hospital discharge physical findings Narrative"),
    ("10187-3", "Review of systems Narrative - Reported"),
    ("10210-3", "Physical findings of General status Narrative"),
    ("10216-0", "Surgical operation note fluids Narrative"),
    ("10218-6", "Surgical operation note postoperative diagnosis Narrative"),
    ("10223-6", "Surgical operation note surgical procedure Narrative"),
    ("10830-8", "Deprecated Surgical operation note complications"),
    ("11329-0", "History general Narrative - Reported"),
    ("11348-0", "History of past illness Narrative"),
    ("11369-6", "History of immunization Narrative"),
    ("11450-4", "Problem list - Reported"),
    ("11493-4", "Hospital discharge studies summary Narrative"),
    ("11535-2", "Hospital discharge Dx Narrative"),
    ("11537-8", "Surgical drains Narrative"),
    ("18776-5", "Plan of treatment (narrative)"),
    ("18841-7", "Hospital consultations Document"),
    ("29299-5", "Reason for visit Narrative"),
    ("29545-1", "Physical findings Narrative"),
    ("29549-3", "Medication administered Narrative"),
    ("29554-3", "Procedure Narrative"),
    ("29762-2", "Social history Narrative"),
    ("30954-2", "Relevant diagnostic tests/laboratory data Narrative"),
    ("42344-2", "Discharge diet (narrative)"),
    ("42346-7", "Medications on admission (narrative)"),
    ("42348-3", "Advance directives (narrative)"),
    ("42349-1", "Reason for referral (narrative)"),
    ("46240-8", "History of hospitalizations+History of outpatient visits Narrative"),
    ("46241-6", "Hospital admission diagnosis Narrative - Reported"),
    ("46264-8", "History of medical device use"),
    ("47420-5", "Functional status assessment note"),
    ("47519-4", "History of Procedures Document"),
    ("48765-2", "Allergies and adverse reactions Document"),
    ("48768-6", "Payment sources Document"),
    ("51848-0", "Evaluation note"),
    ("55109-3", "Complications Document"),
    ("55122-6", "Surgical operation note implants Narrative"),
    ("59768-2", "Procedure indications [interpretation] Narrative"),
    ("59769-0", "Postprocedure diagnosis Narrative"),
    ("59770-8", "Procedure estimated blood loss Narrative"),
    ("59771-6", "Procedure implants Narrative"),
    ("59772-4", "Planned procedure Narrative"),
    ("59773-2", "Procedure specimens taken Narrative"),
    ("59775-7", "Procedure disposition Narrative"),
    ("59776-5", "Procedure findings Narrative"),
    ("61149-1", "Objective Narrative"),
    ("61150-9", "Subjective Narrative"),
    ("69730-0", "Instructions"),
    ("8648-8", "Hospital course Narrative"),
    ("8653-8", "Hospital Discharge instructions"),
    ("8716-3", "Vital signs"),
];

/// Read-only access to the section code table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionRegistry;

impl SectionRegistry {
    /// Returns the label for `code`, or `None` if the code is not in the registry.
    pub fn lookup(code: &str) -> Option<&'static str> {
        SECTION_CODES
            .binary_search_by(|(candidate, _)| (*candidate).cmp(code))
            .ok()
            .map(|idx| SECTION_CODES[idx].1)
    }

    pub fn contains(code: &str) -> bool {
        Self::lookup(code).is_some()
    }

    /// Iterates `(code, label)` pairs in registry order.
    pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
        SECTION_CODES.iter().copied()
    }

    pub fn len() -> usize {
        SECTION_CODES.len()
    }

    /// Label of [`DEFAULT_SECTION_CODE`].
    pub fn default_label() -> &'static str {
        // The default code is part of the static table.
        Self::lookup(DEFAULT_SECTION_CODE).unwrap_or_default()
    }
}

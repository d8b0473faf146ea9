//! Content validation: a lightweight relevance gate ahead of the oracle.
//!
//! Each gap kind maps to a fixed vocabulary; a document must contain at
//! least the configured number of distinct terms (case-insensitive) to be
//! worth an oracle call. This is the only keyword check in the pipeline —
//! ranking deliberately never filters on content.

use lacuna_core::models::GapKind;

/// Per-gap-kind relevance vocabulary.
pub fn vocabulary_for(kind: GapKind) -> &'static [&'static str] {
    match kind {
        GapKind::ExtentOfResection => &[
            "resection",
            "craniotomy",
            "gross total",
            "subtotal",
            "near total",
            "debulking",
            "excision",
            "residual",
            "tumor",
            "operative",
        ],
        GapKind::RadiationCourse => &[
            "radiation",
            "radiotherapy",
            "fraction",
            "gy",
            "cgy",
            "dose",
            "imrt",
            "proton",
            "boost",
            "focal",
            "craniospinal",
        ],
        GapKind::SystemicTherapy => &[
            "chemotherapy",
            "chemo",
            "regimen",
            "cycle",
            "infusion",
            "agent",
            "mg/m2",
            "temozolomide",
            "carboplatin",
            "vincristine",
            "protocol",
        ],
    }
}

/// Count distinct vocabulary terms present in the text, case-insensitively.
pub fn matched_terms(kind: GapKind, text: &str) -> usize {
    let lowered = text.to_lowercase();
    vocabulary_for(kind)
        .iter()
        .filter(|term| lowered.contains(*term))
        .count()
}

/// Relevance gate: true when the document clears the threshold.
pub fn is_relevant(kind: GapKind, text: &str, min_matches: usize) -> bool {
    matched_terms(kind, text) >= min_matches
}

//! Category classification from the source system's type hint and
//! free-text description. Recall over precision: anything unmatched
//! lands in `Other`, never on the floor.

use lacuna_core::models::DocumentCategory;

/// Keyword table: first category whose terms hit wins. The type hint is
/// checked before the description since source systems are more reliable
/// about type codes than about titles.
const CATEGORY_TERMS: &[(DocumentCategory, &[&str])] = &[
    (
        DocumentCategory::OperativeRecord,
        &["operative", "op note", "op report", "surgery report", "procedure note"],
    ),
    (
        DocumentCategory::DischargeSummary,
        &["discharge", "hospital course", "discharge summary"],
    ),
    (
        DocumentCategory::ImagingReport,
        &["mri", "ct ", "imaging", "radiology", "scan report"],
    ),
    (
        DocumentCategory::TreatmentPlan,
        &["treatment plan", "radiation", "rad onc", "radiotherapy", "chemo plan", "therapy plan"],
    ),
    (
        DocumentCategory::PathologyReport,
        &["pathology", "histology", "biopsy report"],
    ),
    (
        DocumentCategory::ProgressNote,
        &["progress", "clinic note", "follow-up", "followup", "visit note"],
    ),
];

/// Classify one document from its type hint and description.
pub fn classify_document(type_hint: &str, description: &str) -> DocumentCategory {
    let hint = type_hint.to_lowercase();
    let desc = description.to_lowercase();

    for (category, terms) in CATEGORY_TERMS {
        if terms.iter().any(|t| hint.contains(t)) {
            return *category;
        }
    }
    for (category, terms) in CATEGORY_TERMS {
        if terms.iter().any(|t| desc.contains(t)) {
            return *category;
        }
    }
    DocumentCategory::Other
}

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document-type buckets the inventory sorts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    OperativeRecord,
    DischargeSummary,
    ProgressNote,
    ImagingReport,
    TreatmentPlan,
    PathologyReport,
    /// Catch-all: recall over precision — nothing is dropped at catalog time.
    Other,
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentCategory::OperativeRecord => "operative record",
            DocumentCategory::DischargeSummary => "discharge summary",
            DocumentCategory::ProgressNote => "progress note",
            DocumentCategory::ImagingReport => "imaging report",
            DocumentCategory::TreatmentPlan => "treatment plan",
            DocumentCategory::PathologyReport => "pathology report",
            DocumentCategory::Other => "other document",
        };
        write!(f, "{label}")
    }
}

/// How the document's bytes turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    /// Plain text, cheap to fetch.
    Text,
    /// HTML/RTF that needs markup stripping.
    Markup,
    /// Scanned image; fetching goes through OCR, the most expensive path.
    Image,
}

impl ContentFormat {
    /// Image-format documents sort last among same-tier candidates when a
    /// cheaper text-bearing alternative exists.
    pub fn needs_ocr(self) -> bool {
        matches!(self, ContentFormat::Image)
    }
}

/// A document as the source system hands it over, before cataloguing.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: Uuid,
    /// Source-system type code or label.
    pub type_hint: String,
    pub description: String,
    pub document_date: Option<NaiveDate>,
    pub format: ContentFormat,
    /// Raw bytes, used only for the content hash at catalog time.
    pub content: Vec<u8>,
}

/// A document reference plus the metadata ranking needs.
/// Immutable once the inventory produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub id: Uuid,
    pub category: DocumentCategory,
    /// Date associated with the document, when the source system had one.
    pub document_date: Option<NaiveDate>,
    pub format: ContentFormat,
    /// Free-text description from the source system.
    pub description: String,
    /// blake3 hash of the raw content, for duplicate-upload collapse.
    pub content_hash: String,
}

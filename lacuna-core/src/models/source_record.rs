use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::candidate::DocumentCategory;
use super::oracle::ConfidenceLabel;
use crate::facts::FactValue;

/// Where a sourced value originated. The analytical store's own rows count
/// as a source too — they participate in adjudication like any document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "category")]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    /// The structured record the timeline was projected from.
    StructuredRecord,
    /// An unstructured document, by inventory category.
    Document(DocumentCategory),
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceCategory::StructuredRecord => write!(f, "structured record"),
            SourceCategory::Document(category) => write!(f, "{category}"),
        }
    }
}

/// How a source value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Carried over from the structured record projection.
    StructuredIngest,
    /// First oracle pass over the document.
    OraclePrimary,
    /// The retry pass with a clarification prompt.
    OracleClarified,
}

/// The durable distillate of a successful extraction attempt.
/// Appended to a fact's provenance; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub category: SourceCategory,
    pub value: FactValue,
    pub method: ExtractionMethod,
    pub confidence: ConfidenceLabel,
    /// Originating document, absent for structured-record sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<Uuid>,
    /// Short supporting excerpt of the raw text, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl SourceRecord {
    /// Baseline source representing a value the structured record already
    /// carried before any extraction ran.
    pub fn structured(value: FactValue) -> Self {
        Self {
            category: SourceCategory::StructuredRecord,
            value,
            method: ExtractionMethod::StructuredIngest,
            confidence: ConfidenceLabel::Medium,
            document_id: None,
            excerpt: None,
            recorded_at: Utc::now(),
        }
    }

    /// Two records conflict when their normalized values differ.
    pub fn conflicts_with(&self, other: &SourceRecord) -> bool {
        self.value.normalized() != other.value.normalized()
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facts::FactValue;

/// The oracle's self-reported confidence in an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

impl ConfidenceLabel {
    /// Numeric rank for comparisons (Low=0 .. High=2).
    pub fn rank(self) -> u8 {
        match self {
            ConfidenceLabel::Low => 0,
            ConfidenceLabel::Medium => 1,
            ConfidenceLabel::High => 2,
        }
    }

    pub fn is_confident(self) -> bool {
        self.rank() >= ConfidenceLabel::Medium.rank()
    }
}

/// Structured output of one oracle invocation.
///
/// The field map is ordered so scripted test fixtures and logged
/// responses render deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleResponse {
    pub fields: BTreeMap<String, FactValue>,
    pub confidence: ConfidenceLabel,
    /// Short supporting excerpt from the document, when the oracle quotes one.
    #[serde(default)]
    pub excerpt: Option<String>,
}

impl OracleResponse {
    pub fn field(&self, key: &str) -> Option<&FactValue> {
        self.fields.get(key)
    }
}

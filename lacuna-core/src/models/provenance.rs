use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::source_record::SourceRecord;
use crate::facts::FactValue;

/// Which adjudication rule produced the final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjudicationMethod {
    /// Normalized values agreed.
    Concordant,
    /// One side was unclear/unparseable; the clear side won.
    ClearOverUnclear,
    /// Ordinal-scale distance plus the per-fact trust hierarchy.
    TrustHierarchy,
    /// Date facts reconciled by day distance.
    DateProximity,
    /// Non-ordinal disagreement; higher-trust category favored.
    TrustDefault,
}

/// The outcome of reconciling conflicting sourced values.
/// Immutable; a later source produces a replacement record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjudicationRecord {
    pub value: FactValue,
    pub method: AdjudicationMethod,
    /// Always non-empty: names the rule that fired and, on conflicts left
    /// for review, both conflicting values. This is what makes the
    /// subsystem auditable.
    pub rationale: String,
    pub requires_manual_review: bool,
    pub adjudicated_at: DateTime<Utc>,
}

/// Per-fact provenance: the resolved value, every contributing source in
/// discovery order, and the adjudication if more than one source weighed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    pub resolved: FactValue,
    /// Append-only within a run; insertion order = discovery order.
    pub sources: Vec<SourceRecord>,
    #[serde(default)]
    pub adjudication: Option<AdjudicationRecord>,
}

impl ProvenanceRecord {
    /// Provenance for a fact with exactly one contributing source.
    pub fn single(source: SourceRecord) -> Self {
        Self {
            resolved: source.value.clone(),
            sources: vec![source],
            adjudication: None,
        }
    }

    /// Whether the fact is flagged for external review.
    pub fn requires_manual_review(&self) -> bool {
        self.adjudication
            .as_ref()
            .is_some_and(|a| a.requires_manual_review)
    }
}

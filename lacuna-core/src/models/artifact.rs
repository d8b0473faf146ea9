use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attempt::{AttemptRecord, ExhaustionReason};
use super::gap::{GapKind, GapPriority, GapStatus};
use crate::constants::ARTIFACT_SCHEMA_VERSION;
use crate::timeline::Event;

/// Manifest entry for a gap that ended the run unresolved. Resolved gaps
/// live on as provenance inside their events; unresolved ones are
/// accounted for here, densely annotated with why each candidate failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapManifestEntry {
    pub event_id: Uuid,
    pub kind: GapKind,
    pub priority: GapPriority,
    pub status: GapStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ExhaustionReason>,
    /// Per-candidate outcomes, in the order candidates were tried.
    pub attempts: Vec<AttemptRecord>,
}

/// The sole persisted boundary artifact: one JSON document per subject.
/// Schema is stable across runs to support downstream diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectArtifact {
    pub schema_version: u32,
    pub subject_id: String,
    /// Full chronological event list, resolved facts and provenance embedded.
    pub events: Vec<Event>,
    /// Unresolved gaps with their terminal status and attempt trails.
    pub gap_manifest: Vec<GapManifestEntry>,
    pub oracle_calls_used: u32,
}

impl SubjectArtifact {
    pub fn new(
        subject_id: &str,
        events: Vec<Event>,
        gap_manifest: Vec<GapManifestEntry>,
        oracle_calls_used: u32,
    ) -> Self {
        Self {
            schema_version: ARTIFACT_SCHEMA_VERSION,
            subject_id: subject_id.to_string(),
            events,
            gap_manifest,
            oracle_calls_used,
        }
    }
}

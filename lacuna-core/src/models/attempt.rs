use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a gap terminated without resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// Every ranked candidate was tried. The value is not in any
    /// available document — expected, not an error.
    CandidatesExhausted,
    /// The per-run oracle call budget ran out before this gap's turn.
    BudgetExhausted,
    /// The oracle went unavailable mid-run.
    OracleUnavailable,
}

/// Terminal outcome of one candidate within an escalation episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOutcome {
    /// Fetch/conversion failed; treated identically to irrelevant content.
    FetchFailed { reason: String },
    /// Too few vocabulary hits for this gap kind.
    ContentIrrelevant { matched_terms: usize },
    /// Oracle output stayed malformed after the one retry.
    OracleMalformed,
    /// The oracle went unavailable during this candidate; the run segment
    /// aborted here.
    OracleUnavailable,
    /// Required fields still missing after the clarification retry.
    FieldsMissing { missing: Vec<String> },
    /// Extraction was complete; the gap resolved here.
    Resolved,
    /// The extracted start date belonged to a different episode; a new
    /// event was synthesized and escalation continued.
    EpisodeDiverted,
}

/// Audit-trail entry: one candidate tried for one gap. Retained in the
/// unresolved-gap manifest so a failed gap explains each candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub document_id: Uuid,
    /// 1-based position in the ranked candidate list.
    pub rank: usize,
    pub oracle_calls: u32,
    pub outcome: CandidateOutcome,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The category of missing fact a gap represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    /// Missing extent-of-resection / surgeon assessment on an operative event.
    ExtentOfResection,
    /// Missing course details (dates, dose, type) on a radiation course.
    RadiationCourse,
    /// Missing course details (dates, regimen) on a systemic therapy course.
    SystemicTherapy,
}

impl GapKind {
    /// Interval-type gaps carry a start date the oracle may contradict,
    /// triggering episode synthesis instead of discard.
    pub fn is_interval(self) -> bool {
        matches!(self, GapKind::RadiationCourse | GapKind::SystemicTherapy)
    }
}

/// Static priority class, assigned per gap kind, never computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPriority {
    Low,
    Medium,
    High,
    Highest,
}

/// Lifecycle status of a gap. Ordered: transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapStatus {
    /// Created, not yet picked up by the orchestrator.
    Pending,
    /// The orchestrator is walking the candidate list.
    Escalating,
    /// A candidate produced a complete extraction.
    Resolved,
    /// Every avenue tried without resolution. Expected, not an error.
    Exhausted,
}

impl GapStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GapStatus::Resolved | GapStatus::Exhausted)
    }
}

/// One missing-or-incomplete fact on one event.
///
/// Gaps are created at the start of a run and discarded at the end;
/// only their resolution is persisted (in the event's provenance and
/// the artifact's unresolved-gap manifest).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
    pub event_id: Uuid,
    pub kind: GapKind,
    pub priority: GapPriority,
    /// Copied from the event; drives temporal ranking.
    pub anchor_date: Option<NaiveDate>,
    /// The fact names this gap needs filled.
    pub required: Vec<String>,
    status: GapStatus,
}

impl Gap {
    pub fn new(
        event_id: Uuid,
        kind: GapKind,
        priority: GapPriority,
        anchor_date: Option<NaiveDate>,
        required: &[&str],
    ) -> Self {
        Self {
            event_id,
            kind,
            priority,
            anchor_date,
            required: required.iter().map(|s| s.to_string()).collect(),
            status: GapStatus::Pending,
        }
    }

    pub fn status(&self) -> GapStatus {
        self.status
    }

    /// Advance the lifecycle status. Backward transitions are rejected:
    /// the status sequence is monotone through the escalation lifecycle.
    pub fn advance(&mut self, next: GapStatus) -> bool {
        if next < self.status || self.status.is_terminal() {
            return false;
        }
        self.status = next;
        true
    }
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::facts::FactValue;
use crate::models::ProvenanceRecord;

/// The kind of clinical event on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A surgical procedure (resection, biopsy).
    Operative,
    /// A course of radiation therapy.
    RadiationCourse,
    /// A course of systemic therapy (chemo, targeted agents).
    SystemicTherapy,
    /// An imaging study.
    Imaging,
    /// Anything else the structured record carries.
    Other,
}

/// A point or interval in the subject's chronological record.
///
/// Owned exclusively by the timeline; only the integrator mutates
/// `facts` and `provenance`. The maps are ordered so serialized
/// artifacts stay byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub kind: EventKind,
    /// The date this event is anchored to, if the structured record had one.
    pub anchor_date: Option<NaiveDate>,
    /// Short free-text description from the structured record.
    pub description: String,
    /// Resolved facts by name.
    pub facts: BTreeMap<String, FactValue>,
    /// Provenance per resolved fact.
    pub provenance: BTreeMap<String, ProvenanceRecord>,
    /// True for events synthesized from a date-mismatched extraction,
    /// i.e. episodes the structured record never represented.
    #[serde(default)]
    pub synthesized: bool,
}

impl Event {
    /// Create a bare event with no facts attached yet.
    pub fn new(kind: EventKind, anchor_date: Option<NaiveDate>, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            anchor_date,
            description: description.to_string(),
            facts: BTreeMap::new(),
            provenance: BTreeMap::new(),
            synthesized: false,
        }
    }

    /// Whether the named fact is present and non-empty.
    pub fn has_fact(&self, name: &str) -> bool {
        self.facts.get(name).is_some_and(FactValue::is_present)
    }
}

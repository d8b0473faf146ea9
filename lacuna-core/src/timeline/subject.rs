use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::Event;

/// One subject's chronological record: the events the structured
/// record produced, sorted by anchor date (undated events last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub subject_id: String,
    pub events: Vec<Event>,
}

impl Timeline {
    pub fn new(subject_id: &str, mut events: Vec<Event>) -> Self {
        sort_events(&mut events);
        Self {
            subject_id: subject_id.to_string(),
            events,
        }
    }

    pub fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn event_mut(&mut self, id: Uuid) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Insert an event, keeping date order. Returns false without inserting
    /// when an equivalent event is already present, so re-integration of the
    /// same extraction state stays idempotent.
    pub fn insert_event(&mut self, event: Event) -> bool {
        let duplicate = self.events.iter().any(|e| {
            e.id == event.id
                || (e.synthesized
                    && event.synthesized
                    && e.kind == event.kind
                    && e.anchor_date == event.anchor_date)
        });
        if duplicate {
            return false;
        }
        self.events.push(event);
        sort_events(&mut self.events);
        true
    }
}

/// Stable sort by anchor date; undated events keep their relative order at
/// the end. Ties break on the id so ordering is deterministic.
fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| match (a.anchor_date, b.anchor_date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

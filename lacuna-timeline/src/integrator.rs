//! Final write-back of adjudicated values onto the chronological record.

use tracing::debug;
use uuid::Uuid;

use lacuna_core::errors::TimelineError;
use lacuna_core::models::ProvenanceRecord;
use lacuna_core::timeline::{Event, Timeline};

/// Writes resolved facts and their provenance onto events.
///
/// The only mutator of timeline events in the whole pipeline. Integration
/// is idempotent: applying the same provenance state twice produces
/// bit-identical events.
pub struct TimelineIntegrator;

impl TimelineIntegrator {
    /// Write each (event, fact) provenance pair back onto its event.
    /// An unknown event id is a wiring bug, reported rather than skipped.
    pub fn apply(
        timeline: &mut Timeline,
        records: impl Iterator<Item = ((Uuid, String), ProvenanceRecord)>,
    ) -> Result<(), TimelineError> {
        for ((event_id, fact), record) in records {
            let event = timeline
                .event_mut(event_id)
                .ok_or_else(|| TimelineError::EventNotFound {
                    event_id: event_id.to_string(),
                })?;
            debug!(event = %event_id, fact = %fact, "integrated fact");
            event.facts.insert(fact.clone(), record.resolved.clone());
            event.provenance.insert(fact, record);
        }
        Ok(())
    }

    /// Insert events synthesized during escalation. Duplicates (same kind
    /// and date, both synthesized) are skipped so re-integration of the
    /// same extraction state stays idempotent.
    pub fn insert_synthesized(timeline: &mut Timeline, events: Vec<Event>) -> usize {
        let mut inserted = 0;
        for event in events {
            if timeline.insert_event(event) {
                inserted += 1;
            }
        }
        inserted
    }
}

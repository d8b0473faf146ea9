//! Provenance tracking: append-only source insertion, conflict detection,
//! and dispatch to the adjudicator.

use std::collections::BTreeMap;

use tracing::debug;
use uuid::Uuid;

use lacuna_core::models::{ProvenanceRecord, SourceRecord};
use lacuna_core::timeline::Event;

use crate::adjudicator::adjudicate;
use crate::trust::trust_rank;

/// Per-run provenance state, keyed by (event, fact). Keys are ordered so
/// iteration — and therefore integration — is deterministic.
#[derive(Debug, Default)]
pub struct ProvenanceTracker {
    records: BTreeMap<(Uuid, String), ProvenanceRecord>,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tracker from an event's pre-existing state. Facts that
    /// already carry provenance (from a prior run's artifact) keep it;
    /// bare structured facts get a baseline structured-record source so
    /// a later extraction of the same fact has something to adjudicate
    /// against.
    pub fn seed_event(&mut self, event: &Event) {
        for (name, value) in &event.facts {
            let key = (event.id, name.clone());
            if self.records.contains_key(&key) {
                continue;
            }
            let record = event
                .provenance
                .get(name)
                .cloned()
                .unwrap_or_else(|| ProvenanceRecord::single(SourceRecord::structured(value.clone())));
            self.records.insert(key, record);
        }
    }

    /// Append a newly extracted source for a fact.
    ///
    /// First source for the fact → single-source provenance. Second and
    /// later sources → adjudication against the incumbent, every time,
    /// agreement included; the adjudication record replaces any prior one.
    /// A prior `requires_manual_review` flag is never cleared silently:
    /// the replacing record's rationale names the earlier flag when it
    /// resolves it.
    pub fn record_source(&mut self, event_id: Uuid, fact: &str, source: SourceRecord) {
        let key = (event_id, fact.to_string());
        match self.records.get_mut(&key) {
            None => {
                self.records.insert(key, ProvenanceRecord::single(source));
            }
            Some(record) => {
                let prior_flag = record.requires_manual_review();
                let incumbent = incumbent_source(fact, record);
                let mut adjudication = adjudicate(fact, &incumbent, &source);

                if prior_flag && !adjudication.requires_manual_review {
                    adjudication.rationale.push_str(
                        "; supersedes an earlier adjudication that was flagged for review",
                    );
                }

                debug!(
                    event = %event_id,
                    fact,
                    sources = record.sources.len() + 1,
                    "source appended, adjudicated"
                );
                record.sources.push(source);
                record.resolved = adjudication.value.clone();
                record.adjudication = Some(adjudication);
            }
        }
    }

    /// Whether any tracked fact on any event is flagged for review.
    pub fn any_manual_review(&self) -> bool {
        self.records.values().any(ProvenanceRecord::requires_manual_review)
    }

    pub fn get(&self, event_id: Uuid, fact: &str) -> Option<&ProvenanceRecord> {
        self.records.get(&(event_id, fact.to_string()))
    }

    /// Drain into (event, fact) → provenance pairs for integration.
    pub fn into_records(self) -> impl Iterator<Item = ((Uuid, String), ProvenanceRecord)> {
        self.records.into_iter()
    }
}

/// The source that currently backs the record's resolved value: the
/// highest-trust source whose value matches `resolved`, else the
/// highest-trust source overall. Cloned so adjudication borrows cleanly.
fn incumbent_source(fact: &str, record: &ProvenanceRecord) -> SourceRecord {
    let resolved_key = record.resolved.normalized();
    let matching = record
        .sources
        .iter()
        .filter(|s| s.value.normalized() == resolved_key)
        .max_by_key(|s| trust_rank(fact, s.category));
    matching
        .or_else(|| {
            record
                .sources
                .iter()
                .max_by_key(|s| trust_rank(fact, s.category))
        })
        .cloned()
        .unwrap_or_else(|| SourceRecord::structured(record.resolved.clone()))
}

//! The escalation state machine.
//!
//! Processes one gap at a time against its ranked candidate list. Gaps are
//! independent of each other; the inventory is read-only once built, so no
//! locking exists inside a subject run.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use lacuna_core::config::ExtractionConfig;
use lacuna_core::constants::{MATERIAL_DATE_MISMATCH_DAYS, MAX_CALLS_PER_CANDIDATE};
use lacuna_core::errors::OracleError;
use lacuna_core::facts::FactValue;
use lacuna_core::models::{
    AttemptRecord, CandidateDocument, CandidateOutcome, ConfidenceLabel, ExhaustionReason,
    ExtractionMethod, Gap, GapKind, GapStatus, OracleResponse, ProvenanceRecord, SourceCategory,
    SourceRecord,
};
use lacuna_core::timeline::{Event, EventKind};
use lacuna_core::traits::{IContentFetcher, IExtractionOracle, IReferencePrimer};

use crate::aliases;
use crate::budget::{CallBudget, OracleGate};
use crate::prompts;
use crate::vocab;

/// Terminal result of one gap's escalation episode.
#[derive(Debug)]
pub struct EscalationOutcome {
    /// The gap, now in a terminal status.
    pub gap: Gap,
    /// Canonical fact → source record, populated on resolution. Includes
    /// known extra fields the oracle volunteered beyond the required set;
    /// those feed conflict detection against already-known values.
    pub extracted: Vec<(String, SourceRecord)>,
    /// Events synthesized from date-mismatched interval extractions.
    pub synthesized_events: Vec<Event>,
    /// Audit trail, one entry per candidate tried.
    pub attempts: Vec<AttemptRecord>,
    pub oracle_calls: u32,
    pub exhaustion: Option<ExhaustionReason>,
}

impl EscalationOutcome {
    /// True when the run segment should stop escalating other gaps too.
    pub fn oracle_unavailable(&self) -> bool {
        matches!(self.exhaustion, Some(ExhaustionReason::OracleUnavailable))
    }
}

/// A merged field: value plus which call supplied it.
struct MergedField {
    value: FactValue,
    method: ExtractionMethod,
    confidence: ConfidenceLabel,
    excerpt: Option<String>,
}

enum CycleResult {
    Resolved(BTreeMap<String, MergedField>),
    Diverted(Box<Event>),
    Incomplete { missing: Vec<String> },
    Malformed,
    BudgetSpent,
    Unavailable,
}

/// The escalation state machine for one subject run.
pub struct ExtractionOrchestrator<'a> {
    oracle: &'a dyn IExtractionOracle,
    fetcher: &'a dyn IContentFetcher,
    primer: Option<&'a dyn IReferencePrimer>,
    config: &'a ExtractionConfig,
    budget: &'a CallBudget,
    gate: Option<&'a OracleGate>,
}

impl<'a> ExtractionOrchestrator<'a> {
    pub fn new(
        oracle: &'a dyn IExtractionOracle,
        fetcher: &'a dyn IContentFetcher,
        config: &'a ExtractionConfig,
        budget: &'a CallBudget,
    ) -> Self {
        Self {
            oracle,
            fetcher,
            primer: None,
            config,
            budget,
            gate: None,
        }
    }

    /// Attach the domain-reference primer for prompt priming.
    pub fn with_primer(mut self, primer: &'a dyn IReferencePrimer) -> Self {
        self.primer = Some(primer);
        self
    }

    /// Route oracle calls through the cross-subject gate.
    pub fn with_gate(mut self, gate: &'a OracleGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Walk the ranked candidate list for one gap until it resolves or
    /// every avenue is spent. Never panics, never returns an error: each
    /// gap independently reaches a terminal status.
    pub fn process_gap(
        &self,
        mut gap: Gap,
        event: &Event,
        candidates: &[CandidateDocument],
    ) -> EscalationOutcome {
        gap.advance(GapStatus::Escalating);
        let mut attempts: Vec<AttemptRecord> = Vec::new();
        let mut synthesized_events: Vec<Event> = Vec::new();
        let mut oracle_calls_total = 0u32;

        for (index, candidate) in candidates.iter().enumerate() {
            let rank = index + 1;

            // Cooperative budget checkpoint: never start a candidate the
            // budget cannot pay for.
            if self.budget.remaining() == 0 {
                warn!(gap_kind = ?gap.kind, "oracle budget spent, gap exhausted");
                gap.advance(GapStatus::Exhausted);
                return EscalationOutcome {
                    gap,
                    extracted: Vec::new(),
                    synthesized_events,
                    attempts,
                    oracle_calls: oracle_calls_total,
                    exhaustion: Some(ExhaustionReason::BudgetExhausted),
                };
            }

            // 1. Fetch. A failure is identical to irrelevant content:
            // advance, never retry the same candidate.
            let document = match self.fetcher.fetch(candidate.id) {
                Ok(doc) => doc,
                Err(err) => {
                    debug!(document = %candidate.id, %err, "fetch failed, advancing");
                    attempts.push(AttemptRecord {
                        document_id: candidate.id,
                        rank,
                        oracle_calls: 0,
                        outcome: CandidateOutcome::FetchFailed {
                            reason: err.to_string(),
                        },
                    });
                    continue;
                }
            };

            // 2. Content validation: cheap relevance gate before the
            // expensive oracle call.
            let matched = vocab::matched_terms(gap.kind, &document.text);
            if matched < self.config.min_term_matches {
                debug!(document = %candidate.id, matched, "content irrelevant, advancing");
                attempts.push(AttemptRecord {
                    document_id: candidate.id,
                    rank,
                    oracle_calls: 0,
                    outcome: CandidateOutcome::ContentIrrelevant {
                        matched_terms: matched,
                    },
                });
                continue;
            }

            // 3–6. Oracle cycle: invoke, divert on date mismatch, validate,
            // retry once with clarification.
            let mut calls_this_candidate = 0u32;
            let cycle = self.run_cycle(&gap, event, candidate, &document.text, &mut calls_this_candidate);
            oracle_calls_total += calls_this_candidate;

            match cycle {
                CycleResult::Resolved(merged) => {
                    info!(
                        gap_kind = ?gap.kind,
                        document = %candidate.id,
                        calls = calls_this_candidate,
                        "gap resolved"
                    );
                    attempts.push(AttemptRecord {
                        document_id: candidate.id,
                        rank,
                        oracle_calls: calls_this_candidate,
                        outcome: CandidateOutcome::Resolved,
                    });
                    gap.advance(GapStatus::Resolved);
                    let extracted = source_records(&merged, candidate);
                    return EscalationOutcome {
                        gap,
                        extracted,
                        synthesized_events,
                        attempts,
                        oracle_calls: oracle_calls_total,
                        exhaustion: None,
                    };
                }
                CycleResult::Diverted(new_event) => {
                    info!(
                        gap_kind = ?gap.kind,
                        document = %candidate.id,
                        diverted_to = %new_event.anchor_date.map(|d| d.to_string()).unwrap_or_default(),
                        "extraction belongs to a different episode, synthesized event"
                    );
                    synthesized_events.push(*new_event);
                    attempts.push(AttemptRecord {
                        document_id: candidate.id,
                        rank,
                        oracle_calls: calls_this_candidate,
                        outcome: CandidateOutcome::EpisodeDiverted,
                    });
                }
                CycleResult::Incomplete { missing } => {
                    debug!(document = %candidate.id, ?missing, "fields missing after retry, advancing");
                    attempts.push(AttemptRecord {
                        document_id: candidate.id,
                        rank,
                        oracle_calls: calls_this_candidate,
                        outcome: CandidateOutcome::FieldsMissing { missing },
                    });
                }
                CycleResult::Malformed => {
                    debug!(document = %candidate.id, "oracle output stayed malformed, advancing");
                    attempts.push(AttemptRecord {
                        document_id: candidate.id,
                        rank,
                        oracle_calls: calls_this_candidate,
                        outcome: CandidateOutcome::OracleMalformed,
                    });
                }
                CycleResult::BudgetSpent => {
                    warn!(gap_kind = ?gap.kind, "oracle budget spent mid-candidate, gap exhausted");
                    gap.advance(GapStatus::Exhausted);
                    return EscalationOutcome {
                        gap,
                        extracted: Vec::new(),
                        synthesized_events,
                        attempts,
                        oracle_calls: oracle_calls_total,
                        exhaustion: Some(ExhaustionReason::BudgetExhausted),
                    };
                }
                CycleResult::Unavailable => {
                    warn!(gap_kind = ?gap.kind, "oracle unavailable, aborting run segment");
                    attempts.push(AttemptRecord {
                        document_id: candidate.id,
                        rank,
                        oracle_calls: calls_this_candidate,
                        outcome: CandidateOutcome::OracleUnavailable,
                    });
                    gap.advance(GapStatus::Exhausted);
                    return EscalationOutcome {
                        gap,
                        extracted: Vec::new(),
                        synthesized_events,
                        attempts,
                        oracle_calls: oracle_calls_total,
                        exhaustion: Some(ExhaustionReason::OracleUnavailable),
                    };
                }
            }
        }

        // Every candidate tried without resolution: the value is not in any
        // available document. Expected terminal state, not an error.
        gap.advance(GapStatus::Exhausted);
        EscalationOutcome {
            gap,
            extracted: Vec::new(),
            synthesized_events,
            attempts,
            oracle_calls: oracle_calls_total,
            exhaustion: Some(ExhaustionReason::CandidatesExhausted),
        }
    }

    /// One candidate's oracle cycle. At most `MAX_CALLS_PER_CANDIDATE`
    /// invocations: a malformed-output retry consumes the same slot the
    /// clarification retry would use.
    fn run_cycle(
        &self,
        gap: &Gap,
        event: &Event,
        candidate: &CandidateDocument,
        text: &str,
        calls: &mut u32,
    ) -> CycleResult {
        let primary_prompt = prompts::build_primary_prompt(gap, event, self.primer);

        let (response, retry_available) = match self.invoke(&primary_prompt, text, calls) {
            Ok(response) => (response, true),
            Err(InvokeFailure::Malformed) => {
                // Tolerate one malformed response: retry the same prompt.
                if *calls >= MAX_CALLS_PER_CANDIDATE {
                    return CycleResult::Malformed;
                }
                match self.invoke(&primary_prompt, text, calls) {
                    Ok(response) => (response, false),
                    Err(InvokeFailure::Malformed) => return CycleResult::Malformed,
                    Err(InvokeFailure::BudgetSpent) => return CycleResult::BudgetSpent,
                    Err(InvokeFailure::Unavailable) => return CycleResult::Unavailable,
                }
            }
            Err(InvokeFailure::BudgetSpent) => return CycleResult::BudgetSpent,
            Err(InvokeFailure::Unavailable) => return CycleResult::Unavailable,
        };

        let mut merged: BTreeMap<String, MergedField> = BTreeMap::new();
        merge_response(&mut merged, &response, ExtractionMethod::OraclePrimary);

        // Date-mismatch short-circuit runs BEFORE completeness validation:
        // a mismatched extraction is often also missing optional fields and
        // would otherwise be discarded, silently losing the episode.
        if let Some(diverted) = self.check_episode_divert(gap, candidate, &merged) {
            return CycleResult::Diverted(diverted);
        }

        let missing = missing_fields(gap, &merged);
        if missing.is_empty() {
            return CycleResult::Resolved(merged);
        }

        if !retry_available || *calls >= MAX_CALLS_PER_CANDIDATE {
            return CycleResult::Incomplete { missing };
        }

        // 5. Exactly one clarification retry: the missing field names plus
        // a one-line hint each, same document text.
        let clarification = prompts::build_clarification_prompt(&missing);
        match self.invoke(&clarification, text, calls) {
            Ok(retry_response) => {
                merge_response(&mut merged, &retry_response, ExtractionMethod::OracleClarified);
            }
            Err(InvokeFailure::Malformed) => {
                return CycleResult::Incomplete { missing };
            }
            Err(InvokeFailure::BudgetSpent) => return CycleResult::BudgetSpent,
            Err(InvokeFailure::Unavailable) => return CycleResult::Unavailable,
        }

        // The retry may be the first to supply a start date; check again.
        if let Some(diverted) = self.check_episode_divert(gap, candidate, &merged) {
            return CycleResult::Diverted(diverted);
        }

        let still_missing = missing_fields(gap, &merged);
        if still_missing.is_empty() {
            CycleResult::Resolved(merged)
        } else {
            CycleResult::Incomplete {
                missing: still_missing,
            }
        }
    }

    /// One budgeted, gated oracle invocation.
    fn invoke(
        &self,
        prompt: &str,
        text: &str,
        calls: &mut u32,
    ) -> Result<OracleResponse, InvokeFailure> {
        if !self.budget.try_acquire() {
            return Err(InvokeFailure::BudgetSpent);
        }
        let _permit = self.gate.map(OracleGate::acquire);
        *calls += 1;
        match self.oracle.invoke(prompt, text) {
            Ok(response) => Ok(response),
            Err(OracleError::Malformed { detail }) => {
                debug!(%detail, "malformed oracle output");
                Err(InvokeFailure::Malformed)
            }
            Err(OracleError::Unavailable { detail }) => {
                warn!(%detail, "oracle unavailable");
                Err(InvokeFailure::Unavailable)
            }
        }
    }

    /// Synthesize a new event when an interval extraction's start date
    /// materially differs from the gap's anchor — data belonging to an
    /// episode the structured record never represented.
    fn check_episode_divert(
        &self,
        gap: &Gap,
        candidate: &CandidateDocument,
        merged: &BTreeMap<String, MergedField>,
    ) -> Option<Box<Event>> {
        if !gap.kind.is_interval() {
            return None;
        }
        let anchor = gap.anchor_date?;
        let extracted_start = merged.get("start_date")?.value.as_date()?;
        let drift = (extracted_start - anchor).num_days().abs();
        if drift <= MATERIAL_DATE_MISMATCH_DAYS {
            return None;
        }

        let kind = match gap.kind {
            GapKind::RadiationCourse => EventKind::RadiationCourse,
            GapKind::SystemicTherapy => EventKind::SystemicTherapy,
            GapKind::ExtentOfResection => return None,
        };
        let mut event = Event::new(
            kind,
            Some(extracted_start),
            "recovered treatment course",
        );
        event.synthesized = true;
        for (name, field) in merged {
            if !aliases::is_known_field(name) || field.value.is_unclear() {
                continue;
            }
            let record = SourceRecord {
                category: SourceCategory::Document(candidate.category),
                value: field.value.clone(),
                method: field.method,
                confidence: field.confidence,
                document_id: Some(candidate.id),
                excerpt: field.excerpt.clone(),
                recorded_at: Utc::now(),
            };
            event.facts.insert(name.clone(), field.value.clone());
            event
                .provenance
                .insert(name.clone(), ProvenanceRecord::single(record));
        }
        Some(Box::new(event))
    }
}

enum InvokeFailure {
    Malformed,
    BudgetSpent,
    Unavailable,
}

/// Fold a response into the merged map under canonical keys. Earlier calls
/// win; the clarification retry only fills holes it was asked about.
fn merge_response(
    merged: &mut BTreeMap<String, MergedField>,
    response: &OracleResponse,
    method: ExtractionMethod,
) {
    for (name, value) in aliases::canonicalize(response) {
        let replace = match merged.get(&name) {
            None => true,
            // A clear retry answer replaces an unclear first answer.
            Some(existing) => existing.value.is_unclear() && !value.is_unclear(),
        };
        if replace {
            merged.insert(
                name,
                MergedField {
                    value,
                    method,
                    confidence: response.confidence,
                    excerpt: response.excerpt.clone(),
                },
            );
        }
    }
}

/// Required fields not yet present with a usable value.
fn missing_fields(gap: &Gap, merged: &BTreeMap<String, MergedField>) -> Vec<String> {
    gap.required
        .iter()
        .filter(|name| {
            merged
                .get(*name)
                .map_or(true, |field| field.value.is_unclear())
        })
        .cloned()
        .collect()
}

/// Distill the merged map into durable source records: every required
/// field, plus known extra fields the oracle volunteered (those feed
/// conflict detection against values the record already carried).
fn source_records(
    merged: &BTreeMap<String, MergedField>,
    candidate: &CandidateDocument,
) -> Vec<(String, SourceRecord)> {
    merged
        .iter()
        .filter(|(name, field)| aliases::is_known_field(name) && !field.value.is_unclear())
        .map(|(name, field)| {
            (
                name.clone(),
                SourceRecord {
                    category: SourceCategory::Document(candidate.category),
                    value: field.value.clone(),
                    method: field.method,
                    confidence: field.confidence,
                    document_id: Some(candidate.id),
                    excerpt: field.excerpt.clone(),
                    recorded_at: Utc::now(),
                },
            )
        })
        .collect()
}

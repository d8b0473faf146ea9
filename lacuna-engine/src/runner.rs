//! The per-subject engine run and the cross-subject parallel runner.

use rayon::prelude::*;
use tracing::{debug, info};

use lacuna_adjudication::ProvenanceTracker;
use lacuna_core::config::LacunaConfig;
use lacuna_core::errors::LacunaResult;
use lacuna_core::models::{
    ExhaustionReason, ExtractionMethod, GapManifestEntry, GapStatus, ProvenanceRecord,
    RawDocument, SubjectArtifact,
};
use lacuna_core::timeline::Timeline;
use lacuna_core::traits::{IContentFetcher, IExtractionOracle, IReferencePrimer};
use lacuna_extraction::{CallBudget, ExtractionOrchestrator, OracleGate};
use lacuna_gaps::identify_gaps;
use lacuna_ranking::{rank_candidates, DocumentInventory};
use lacuna_timeline::TimelineIntegrator;

/// Shared collaborators and configuration for one or more engine runs.
/// All references, so the same context fans out across rayon workers.
pub struct EngineContext<'a> {
    pub oracle: &'a dyn IExtractionOracle,
    pub fetcher: &'a dyn IContentFetcher,
    pub primer: Option<&'a dyn IReferencePrimer>,
    pub config: &'a LacunaConfig,
    /// The one synchronized resource across subjects.
    pub gate: &'a OracleGate,
}

/// One subject's inputs: the projected timeline plus every available
/// document, as the source system hands them over.
pub struct SubjectInput {
    pub timeline: Timeline,
    pub documents: Vec<RawDocument>,
}

/// Run the full engine for one subject.
///
/// Gaps resolve one at a time — escalation is inherently sequential and
/// the oracle is the shared expensive resource. Per-gap failures never
/// escape: every gap reaches a terminal status, and the only fallible
/// part here is the final integration/serialization boundary.
pub fn run_subject(ctx: &EngineContext<'_>, input: SubjectInput) -> LacunaResult<SubjectArtifact> {
    let SubjectInput {
        mut timeline,
        documents,
    } = input;

    let inventory = DocumentInventory::build(&documents);
    let gaps = identify_gaps(&timeline);
    info!(
        subject = %timeline.subject_id,
        gaps = gaps.len(),
        documents = inventory.len(),
        "starting subject run"
    );

    let budget = CallBudget::new(ctx.config.extraction.oracle_call_budget);
    let mut orchestrator =
        ExtractionOrchestrator::new(ctx.oracle, ctx.fetcher, &ctx.config.extraction, &budget)
            .with_gate(ctx.gate);
    if let Some(primer) = ctx.primer {
        orchestrator = orchestrator.with_primer(primer);
    }

    let mut tracker = ProvenanceTracker::new();
    let mut manifest: Vec<GapManifestEntry> = Vec::new();
    let mut synthesized = Vec::new();
    let mut oracle_down = false;

    for mut gap in gaps {
        // Cooperative checkpoint: once the budget is spent or the oracle is
        // gone, remaining gaps terminate directly — no half-resolved state.
        if oracle_down || budget.remaining() == 0 {
            let reason = if oracle_down {
                ExhaustionReason::OracleUnavailable
            } else {
                ExhaustionReason::BudgetExhausted
            };
            gap.advance(GapStatus::Exhausted);
            manifest.push(GapManifestEntry {
                event_id: gap.event_id,
                kind: gap.kind,
                priority: gap.priority,
                status: gap.status(),
                reason: Some(reason),
                attempts: Vec::new(),
            });
            continue;
        }

        let Some(event) = timeline.event(gap.event_id) else {
            // Gaps are projected from this same timeline; a miss here would
            // mean the record mutated mid-run.
            debug!(event = %gap.event_id, "gap references unknown event, skipping");
            continue;
        };

        tracker.seed_event(event);
        let candidates = rank_candidates(&gap, &inventory, &ctx.config.ranking);
        let outcome = orchestrator.process_gap(gap, event, &candidates);

        if outcome.oracle_unavailable() {
            oracle_down = true;
        }
        for (fact, source) in outcome.extracted {
            tracker.record_source(outcome.gap.event_id, &fact, source);
        }
        synthesized.extend(outcome.synthesized_events);

        if outcome.gap.status() != GapStatus::Resolved {
            manifest.push(GapManifestEntry {
                event_id: outcome.gap.event_id,
                kind: outcome.gap.kind,
                priority: outcome.gap.priority,
                status: outcome.gap.status(),
                reason: outcome.exhaustion,
                attempts: outcome.attempts,
            });
        }
    }

    // Write back only what the run actually learned; untouched structured
    // baselines stay implicit on their events.
    let learned = tracker
        .into_records()
        .filter(|(_, record)| record_learned(record));
    TimelineIntegrator::apply(&mut timeline, learned)?;
    TimelineIntegrator::insert_synthesized(&mut timeline, synthesized);

    let calls_used = budget.used();
    let subject_id = timeline.subject_id.clone();
    info!(
        subject = %subject_id,
        oracle_calls = calls_used,
        unresolved = manifest.len(),
        "subject run complete"
    );
    Ok(SubjectArtifact::new(
        &subject_id,
        timeline.events,
        manifest,
        calls_used,
    ))
}

/// Run many subjects in parallel. Each run is independent; the oracle
/// gate inside the context is the only shared state.
pub fn run_subjects(
    ctx: &EngineContext<'_>,
    inputs: Vec<SubjectInput>,
) -> Vec<LacunaResult<SubjectArtifact>> {
    inputs
        .into_par_iter()
        .map(|input| run_subject(ctx, input))
        .collect()
}

/// A provenance record is worth writing back when extraction contributed
/// to it — more than the seeded structured baseline.
fn record_learned(record: &ProvenanceRecord) -> bool {
    record.adjudication.is_some()
        || record
            .sources
            .iter()
            .any(|s| s.method != ExtractionMethod::StructuredIngest)
}

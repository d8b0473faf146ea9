//! State-machine tests for the extraction orchestrator, driven by the
//! scripted oracle stub.

use chrono::NaiveDate;
use uuid::Uuid;

use lacuna_core::config::ExtractionConfig;
use lacuna_core::facts::FactValue;
use lacuna_core::models::{
    CandidateDocument, CandidateOutcome, ConfidenceLabel, ContentFormat, DocumentCategory,
    ExhaustionReason, Gap, GapKind, GapPriority, GapStatus,
};
use lacuna_core::timeline::{Event, EventKind};
use lacuna_extraction::{CallBudget, ExtractionOrchestrator};
use test_fixtures::{date, oracle_response, ScriptedCall, ScriptedOracle, StaticFetcher};

const RELEVANT_RT_TEXT: &str =
    "Radiation therapy completed; total dose 54 Gy delivered in 30 fractions.";
const IRRELEVANT_TEXT: &str = "Patient seen in clinic. No complaints today.";

fn radiation_gap(anchor: Option<NaiveDate>, event_id: Uuid) -> Gap {
    Gap::new(
        event_id,
        GapKind::RadiationCourse,
        GapPriority::High,
        anchor,
        &["start_date", "stop_date", "total_dose"],
    )
}

fn rt_event(anchor: Option<NaiveDate>) -> Event {
    Event::new(EventKind::RadiationCourse, anchor, "Radiation course")
}

fn candidate(category: DocumentCategory) -> CandidateDocument {
    CandidateDocument {
        id: Uuid::new_v4(),
        category,
        document_date: Some(date(2018, 4, 25)),
        format: ContentFormat::Text,
        description: "treatment summary".into(),
        content_hash: "hash".into(),
    }
}

// ─── Partial extraction, clarified retry, resolved in two calls ───

#[test]
fn partial_then_clarified_resolves_in_two_calls() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let doc = candidate(DocumentCategory::TreatmentPlan);
    let fetcher = StaticFetcher::new().with_text(doc.id, RELEVANT_RT_TEXT);

    let oracle = ScriptedOracle::new(vec![
        ScriptedCall::Respond(oracle_response(
            &[
                ("start_date", FactValue::Date(date(2018, 4, 25))),
                ("total_dose", FactValue::Number(54.0)),
            ],
            ConfidenceLabel::High,
        )),
        ScriptedCall::Respond(oracle_response(
            &[("stop_date", FactValue::Date(date(2018, 6, 6)))],
            ConfidenceLabel::High,
        )),
    ]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, std::slice::from_ref(&doc));

    assert_eq!(outcome.gap.status(), GapStatus::Resolved);
    assert_eq!(outcome.oracle_calls, 2);
    assert_eq!(oracle.calls(), 2);
    assert!(outcome.exhaustion.is_none());

    let facts: Vec<&str> = outcome.extracted.iter().map(|(f, _)| f.as_str()).collect();
    assert!(facts.contains(&"start_date"));
    assert!(facts.contains(&"stop_date"));
    assert!(facts.contains(&"total_dose"));

    // The clarification prompt names only the missing field.
    let prompts = oracle.prompts.lock().unwrap();
    assert!(prompts[1].contains("stop_date"));
    assert!(!prompts[1].contains("total_dose"));
}

// ─── Field aliases satisfy completeness validation ───

#[test]
fn aliased_field_names_count_as_present() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let doc = candidate(DocumentCategory::TreatmentPlan);
    let fetcher = StaticFetcher::new().with_text(doc.id, RELEVANT_RT_TEXT);

    // Every field arrives under an alias, none under its canonical key.
    let oracle = ScriptedOracle::new(vec![ScriptedCall::Respond(oracle_response(
        &[
            ("course_start", FactValue::Date(date(2018, 4, 25))),
            ("completion_date", FactValue::Date(date(2018, 6, 6))),
            ("cumulative_dose", FactValue::Number(54.0)),
        ],
        ConfidenceLabel::Medium,
    ))]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, std::slice::from_ref(&doc));
    assert_eq!(outcome.gap.status(), GapStatus::Resolved);
    assert_eq!(outcome.oracle_calls, 1);
}

// ─── Date-mismatch short-circuit synthesizes a new event ───

#[test]
fn mismatched_start_date_synthesizes_event_instead_of_discarding() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let doc = candidate(DocumentCategory::TreatmentPlan);
    let fetcher = StaticFetcher::new().with_text(doc.id, RELEVANT_RT_TEXT);

    // The extraction is also incomplete — without the short-circuit it
    // would be discarded entirely, silently losing the episode.
    let oracle = ScriptedOracle::new(vec![ScriptedCall::Respond(oracle_response(
        &[
            ("start_date", FactValue::Date(date(2017, 11, 2))),
            ("total_dose", FactValue::Number(30.6)),
        ],
        ConfidenceLabel::Medium,
    ))]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, std::slice::from_ref(&doc));

    assert_eq!(outcome.synthesized_events.len(), 1);
    let recovered = &outcome.synthesized_events[0];
    assert!(recovered.synthesized);
    assert_eq!(recovered.anchor_date, Some(date(2017, 11, 2)));
    assert_eq!(recovered.kind, EventKind::RadiationCourse);
    assert!(recovered.facts.contains_key("start_date"));
    assert!(recovered.facts.contains_key("total_dose"));
    assert!(recovered.provenance.contains_key("start_date"));

    // The original gap stays unresolved and escalation moved on.
    assert_eq!(outcome.gap.status(), GapStatus::Exhausted);
    assert_eq!(
        outcome.attempts[0].outcome,
        CandidateOutcome::EpisodeDiverted
    );
}

// ─── All candidates content-invalid: exhausted, zero oracle calls ───

#[test]
fn all_candidates_irrelevant_exhausts_without_oracle_calls() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);

    let candidates: Vec<CandidateDocument> = (0..5)
        .map(|_| candidate(DocumentCategory::ProgressNote))
        .collect();
    let mut fetcher = StaticFetcher::new();
    for c in &candidates {
        fetcher = fetcher.with_text(c.id, IRRELEVANT_TEXT);
    }

    let oracle = ScriptedOracle::new(vec![]);
    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, &candidates);

    assert_eq!(outcome.gap.status(), GapStatus::Exhausted);
    assert_eq!(
        outcome.exhaustion,
        Some(ExhaustionReason::CandidatesExhausted)
    );
    assert_eq!(outcome.oracle_calls, 0);
    assert!(outcome.extracted.is_empty());
    assert_eq!(outcome.attempts.len(), 5);
    assert!(outcome
        .attempts
        .iter()
        .all(|a| matches!(a.outcome, CandidateOutcome::ContentIrrelevant { .. })));
}

// ─── Fetch failure advances without retrying the same candidate ───

#[test]
fn fetch_failure_advances_to_next_candidate() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let missing_doc = candidate(DocumentCategory::TreatmentPlan);
    let good_doc = candidate(DocumentCategory::DischargeSummary);
    // Only the second candidate is fetchable.
    let fetcher = StaticFetcher::new().with_text(good_doc.id, RELEVANT_RT_TEXT);

    let oracle = ScriptedOracle::new(vec![ScriptedCall::Respond(oracle_response(
        &[
            ("start_date", FactValue::Date(date(2018, 4, 25))),
            ("stop_date", FactValue::Date(date(2018, 6, 6))),
            ("total_dose", FactValue::Number(54.0)),
        ],
        ConfidenceLabel::High,
    ))]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, &[missing_doc, good_doc]);

    assert_eq!(outcome.gap.status(), GapStatus::Resolved);
    assert!(matches!(
        outcome.attempts[0].outcome,
        CandidateOutcome::FetchFailed { .. }
    ));
    assert_eq!(outcome.attempts[1].outcome, CandidateOutcome::Resolved);
}

// ─── Malformed output: retried once, then the candidate is spent ───

#[test]
fn malformed_output_retried_once_then_advances() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let first = candidate(DocumentCategory::TreatmentPlan);
    let second = candidate(DocumentCategory::DischargeSummary);
    let fetcher = StaticFetcher::new()
        .with_text(first.id, RELEVANT_RT_TEXT)
        .with_text(second.id, RELEVANT_RT_TEXT);

    let complete = oracle_response(
        &[
            ("start_date", FactValue::Date(date(2018, 4, 25))),
            ("stop_date", FactValue::Date(date(2018, 6, 6))),
            ("total_dose", FactValue::Number(54.0)),
        ],
        ConfidenceLabel::High,
    );
    let oracle = ScriptedOracle::new(vec![
        ScriptedCall::Malformed,
        ScriptedCall::Malformed,
        ScriptedCall::Respond(complete),
    ]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, &[first, second]);

    assert_eq!(outcome.gap.status(), GapStatus::Resolved);
    assert_eq!(outcome.attempts[0].outcome, CandidateOutcome::OracleMalformed);
    assert_eq!(outcome.attempts[0].oracle_calls, 2);
    assert_eq!(outcome.attempts[1].outcome, CandidateOutcome::Resolved);
}

// ─── A malformed retry consumes the clarification slot ───

#[test]
fn oracle_calls_never_exceed_two_per_candidate() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let first = candidate(DocumentCategory::TreatmentPlan);
    let second = candidate(DocumentCategory::DischargeSummary);
    let fetcher = StaticFetcher::new()
        .with_text(first.id, RELEVANT_RT_TEXT)
        .with_text(second.id, RELEVANT_RT_TEXT);

    // Candidate 1: malformed then incomplete — no clarification left.
    // Candidate 2: incomplete then still incomplete after clarification.
    let partial = oracle_response(
        &[("start_date", FactValue::Date(date(2018, 4, 25)))],
        ConfidenceLabel::Medium,
    );
    let oracle = ScriptedOracle::new(vec![
        ScriptedCall::Malformed,
        ScriptedCall::Respond(partial.clone()),
        ScriptedCall::Respond(partial.clone()),
        ScriptedCall::Respond(partial),
    ]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, &[first, second]);

    assert_eq!(outcome.gap.status(), GapStatus::Exhausted);
    assert_eq!(outcome.oracle_calls, 4);
    assert!(outcome.attempts.iter().all(|a| a.oracle_calls <= 2));
    assert!(outcome
        .attempts
        .iter()
        .all(|a| matches!(a.outcome, CandidateOutcome::FieldsMissing { .. })));
}

// ─── Budget exhaustion is a cooperative checkpoint ───

#[test]
fn spent_budget_exhausts_gap_without_further_attempts() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let doc = candidate(DocumentCategory::TreatmentPlan);
    let fetcher = StaticFetcher::new().with_text(doc.id, RELEVANT_RT_TEXT);

    let partial = oracle_response(
        &[("start_date", FactValue::Date(date(2018, 4, 25)))],
        ConfidenceLabel::Medium,
    );
    let oracle = ScriptedOracle::new(vec![ScriptedCall::Respond(partial)]);

    let config = ExtractionConfig::default();
    // One call: enough for the primary pass, not the clarification.
    let budget = CallBudget::new(1);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, std::slice::from_ref(&doc));

    assert_eq!(outcome.gap.status(), GapStatus::Exhausted);
    assert_eq!(outcome.exhaustion, Some(ExhaustionReason::BudgetExhausted));
    assert_eq!(oracle.calls(), 1);
}

// ─── Oracle outage aborts the run segment with a distinct reason ───

#[test]
fn oracle_unavailable_marks_gap_with_reason() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let doc = candidate(DocumentCategory::TreatmentPlan);
    let extra = candidate(DocumentCategory::DischargeSummary);
    let fetcher = StaticFetcher::new()
        .with_text(doc.id, RELEVANT_RT_TEXT)
        .with_text(extra.id, RELEVANT_RT_TEXT);

    let oracle = ScriptedOracle::new(vec![ScriptedCall::Unavailable]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, &[doc, extra]);

    assert_eq!(outcome.gap.status(), GapStatus::Exhausted);
    assert_eq!(outcome.exhaustion, Some(ExhaustionReason::OracleUnavailable));
    assert!(outcome.oracle_unavailable());
    // The second candidate was never tried.
    assert_eq!(outcome.attempts.len(), 1);
}

// ─── Unclear answers count as missing, not as data ───

#[test]
fn unclear_values_do_not_satisfy_completeness() {
    let event = rt_event(Some(date(2018, 4, 25)));
    let gap = radiation_gap(event.anchor_date, event.id);
    let doc = candidate(DocumentCategory::TreatmentPlan);
    let fetcher = StaticFetcher::new().with_text(doc.id, RELEVANT_RT_TEXT);

    let hedged = oracle_response(
        &[
            ("start_date", FactValue::Date(date(2018, 4, 25))),
            ("stop_date", FactValue::Text("unknown".into())),
            ("total_dose", FactValue::Number(54.0)),
        ],
        ConfidenceLabel::Medium,
    );
    let oracle = ScriptedOracle::new(vec![ScriptedCall::Respond(hedged.clone()), ScriptedCall::Respond(hedged)]);

    let config = ExtractionConfig::default();
    let budget = CallBudget::new(config.oracle_call_budget);
    let orchestrator = ExtractionOrchestrator::new(&oracle, &fetcher, &config, &budget);

    let outcome = orchestrator.process_gap(gap, &event, std::slice::from_ref(&doc));

    assert_eq!(outcome.gap.status(), GapStatus::Exhausted);
    assert!(matches!(
        &outcome.attempts[0].outcome,
        CandidateOutcome::FieldsMissing { missing } if missing.contains(&"stop_date".to_string())
    ));
}

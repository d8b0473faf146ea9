//! The adjudication rule chain. Evaluated in order, first match wins.
//!
//! Total over any two well-formed source records: every invocation
//! returns a record with a non-empty rationale, equal inputs included.

use chrono::Utc;
use tracing::debug;

use lacuna_core::constants::DATE_STEP_DAYS;
use lacuna_core::models::{AdjudicationMethod, AdjudicationRecord, SourceRecord};

use crate::scales;
use crate::trust::trust_rank;

/// Reconcile two sourced values for one fact into a single final value.
///
/// `incumbent` is the side that currently backs the resolved value;
/// `challenger` is the newly arrived source. Trust ties favor the
/// incumbent so repeated adjudication stays deterministic.
pub fn adjudicate(
    fact: &str,
    incumbent: &SourceRecord,
    challenger: &SourceRecord,
) -> AdjudicationRecord {
    let record = run_rules(fact, incumbent, challenger);
    debug!(
        fact,
        method = ?record.method,
        review = record.requires_manual_review,
        "adjudicated"
    );
    record
}

fn run_rules(fact: &str, incumbent: &SourceRecord, challenger: &SourceRecord) -> AdjudicationRecord {
    // Rule 1: agreement after normalization.
    if incumbent.value.normalized() == challenger.value.normalized() {
        return AdjudicationRecord {
            value: incumbent.value.clone(),
            method: AdjudicationMethod::Concordant,
            rationale: format!(
                "{} and {} independently report \"{}\"",
                incumbent.category, challenger.category, incumbent.value
            ),
            requires_manual_review: false,
            adjudicated_at: Utc::now(),
        };
    }

    // Rule 2: one side unclear/unparseable — prefer the clear side.
    match (incumbent.value.is_unclear(), challenger.value.is_unclear()) {
        (false, true) => {
            return clear_side_wins(incumbent, challenger);
        }
        (true, false) => {
            return clear_side_wins(challenger, incumbent);
        }
        (true, true) => {
            let (favored, other) = by_trust(fact, incumbent, challenger);
            return AdjudicationRecord {
                value: favored.value.clone(),
                method: AdjudicationMethod::ClearOverUnclear,
                rationale: format!(
                    "both {} and {} are unclear; retained the {} answer pending review",
                    favored.category, other.category, favored.category
                ),
                requires_manual_review: true,
                adjudicated_at: Utc::now(),
            };
        }
        (false, false) => {}
    }

    // Rule 3: ordinal distance on facts with a defined scale.
    if let (Some(pos_a), Some(pos_b)) = (
        scales::ordinal_position(fact, &incumbent.value),
        scales::ordinal_position(fact, &challenger.value),
    ) {
        let distance = pos_a.abs_diff(pos_b);
        let (favored, other) = by_trust(fact, incumbent, challenger);
        if distance >= 2 {
            return AdjudicationRecord {
                value: favored.value.clone(),
                method: AdjudicationMethod::TrustHierarchy,
                rationale: format!(
                    "\"{}\" ({}) and \"{}\" ({}) are {} steps apart on the extent scale; \
                     favored the {} but the disagreement needs review",
                    incumbent.value,
                    incumbent.category,
                    challenger.value,
                    challenger.category,
                    distance,
                    favored.category
                ),
                requires_manual_review: true,
                adjudicated_at: Utc::now(),
            };
        }
        // Distance ≤ 1. Rule 4 folds in here: a high-confidence lower-trust
        // source never flips the value, it only forces the review flag when
        // the favored side is less sure.
        let review = other.confidence.rank() > favored.confidence.rank();
        return AdjudicationRecord {
            value: favored.value.clone(),
            method: AdjudicationMethod::TrustHierarchy,
            rationale: format!(
                "adjacent scale values \"{}\" ({}) and \"{}\" ({}); favored the {}{}",
                incumbent.value,
                incumbent.category,
                challenger.value,
                challenger.category,
                favored.category,
                if review {
                    ", flagged because the disfavored source reported higher confidence"
                } else {
                    ""
                }
            ),
            requires_manual_review: review,
            adjudicated_at: Utc::now(),
        };
    }

    // Date facts: day distance plays the role of ordinal distance.
    if let (Some(date_a), Some(date_b)) =
        (incumbent.value.as_date(), challenger.value.as_date())
    {
        let days = (date_a - date_b).num_days().abs();
        let (favored, other) = by_trust(fact, incumbent, challenger);
        let material = days > DATE_STEP_DAYS;
        let review = material || other.confidence.rank() > favored.confidence.rank();
        return AdjudicationRecord {
            value: favored.value.clone(),
            method: AdjudicationMethod::DateProximity,
            rationale: format!(
                "{} ({}) vs {} ({}) differ by {} days; favored the {}{}",
                incumbent.value,
                incumbent.category,
                challenger.value,
                challenger.category,
                days,
                favored.category,
                if material { ", gap too wide to reconcile automatically" } else { "" }
            ),
            requires_manual_review: review,
            adjudicated_at: Utc::now(),
        };
    }

    // Fallback: non-ordinal, non-date disagreement. Favor the trust
    // hierarchy; flag unless the favored side is strictly more confident.
    let (favored, other) = by_trust(fact, incumbent, challenger);
    let review = favored.confidence.rank() <= other.confidence.rank();
    AdjudicationRecord {
        value: favored.value.clone(),
        method: AdjudicationMethod::TrustDefault,
        rationale: format!(
            "\"{}\" ({}) conflicts with \"{}\" ({}); favored the {} by source hierarchy{}",
            incumbent.value,
            incumbent.category,
            challenger.value,
            challenger.category,
            favored.category,
            if review { ", left for review" } else { "" }
        ),
        requires_manual_review: review,
        adjudicated_at: Utc::now(),
    }
}

fn clear_side_wins(clear: &SourceRecord, unclear: &SourceRecord) -> AdjudicationRecord {
    AdjudicationRecord {
        value: clear.value.clone(),
        method: AdjudicationMethod::ClearOverUnclear,
        rationale: format!(
            "the {} could not determine the value; took \"{}\" from the {}",
            unclear.category, clear.value, clear.category
        ),
        requires_manual_review: false,
        adjudicated_at: Utc::now(),
    }
}

/// Order two sources by the fact's trust table, ties to the first
/// argument (the incumbent).
fn by_trust<'a>(
    fact: &str,
    a: &'a SourceRecord,
    b: &'a SourceRecord,
) -> (&'a SourceRecord, &'a SourceRecord) {
    if trust_rank(fact, b.category) > trust_rank(fact, a.category) {
        (b, a)
    } else {
        (a, b)
    }
}

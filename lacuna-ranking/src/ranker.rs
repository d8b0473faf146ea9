//! Candidate ranking: tier order, then OCR cost, then temporal proximity.

use tracing::debug;

use lacuna_core::config::RankingConfig;
use lacuna_core::models::{CandidateDocument, Gap};

use crate::inventory::DocumentInventory;
use crate::tiers::{tiers_for, NULL_ANCHOR_TIER_DEPTH};

/// Produce the ordered candidate list for a gap.
///
/// Within each tier candidates sort by `(needs_ocr, days_from_anchor)`
/// ascending — image-format documents go last among same-tier peers, and
/// undated documents rank after dated ones rather than being excluded.
/// Tiers concatenate in order; the list caps at the configured maximum.
///
/// With no anchor date there is nothing to be proximate to: the ranker
/// falls back to an unordered tier-1/2 sweep (catalog order). Using the
/// subject's nearest known event date as a proxy anchor was considered
/// and rejected; see DESIGN.md.
///
/// Pure function: same gap + same inventory → same list.
pub fn rank_candidates(
    gap: &Gap,
    inventory: &DocumentInventory,
    config: &RankingConfig,
) -> Vec<CandidateDocument> {
    let tiers = tiers_for(gap.kind);
    let cap = config.candidate_cap();

    let mut ranked: Vec<CandidateDocument> = Vec::new();

    match gap.anchor_date {
        Some(anchor) => {
            for tier in tiers {
                let mut tier_docs: Vec<&CandidateDocument> = tier
                    .iter()
                    .flat_map(|category| inventory.bucket(*category))
                    .collect();
                tier_docs.sort_by_key(|doc| {
                    let days = doc
                        .document_date
                        .map(|d| (d - anchor).num_days().abs())
                        .unwrap_or(i64::MAX);
                    (doc.format.needs_ocr(), days, doc.id)
                });
                ranked.extend(tier_docs.into_iter().cloned());
                if ranked.len() >= cap {
                    break;
                }
            }
        }
        None => {
            for tier in tiers.iter().take(NULL_ANCHOR_TIER_DEPTH) {
                for category in *tier {
                    ranked.extend(inventory.bucket(*category).iter().cloned());
                }
            }
        }
    }

    ranked.truncate(cap);
    debug!(
        gap_kind = ?gap.kind,
        anchored = gap.anchor_date.is_some(),
        candidates = ranked.len(),
        "ranked candidates"
    );
    ranked
}

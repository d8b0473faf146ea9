//! Gap identification over a subject timeline.

use tracing::debug;

use lacuna_core::models::Gap;
use lacuna_core::timeline::Timeline;

use crate::requirements::{priority_for, required_facts};

/// Scan the timeline and emit one gap per event with missing required
/// facts. Synthesized events are skipped — they exist because an earlier
/// extraction already ran against them.
///
/// Gaps come back ordered by priority (highest first), ties broken by
/// timeline position, so the orchestrator spends its oracle budget on the
/// most valuable gaps first.
pub fn identify_gaps(timeline: &Timeline) -> Vec<Gap> {
    let mut gaps: Vec<(usize, Gap)> = Vec::new();

    for (position, event) in timeline.events.iter().enumerate() {
        if event.synthesized {
            continue;
        }
        let Some((gap_kind, required)) = required_facts(event.kind) else {
            continue;
        };

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !event.has_fact(name))
            .collect();
        if missing.is_empty() {
            continue;
        }

        debug!(
            event = %event.id,
            kind = ?gap_kind,
            missing = ?missing,
            "identified gap"
        );
        gaps.push((
            position,
            Gap::new(
                event.id,
                gap_kind,
                priority_for(gap_kind),
                event.anchor_date,
                &missing,
            ),
        ));
    }

    gaps.sort_by(|(pos_a, a), (pos_b, b)| {
        b.priority.cmp(&a.priority).then_with(|| pos_a.cmp(pos_b))
    });
    gaps.into_iter().map(|(_, gap)| gap).collect()
}

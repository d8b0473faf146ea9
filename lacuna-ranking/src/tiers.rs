//! Static tier tables: document-type trust ordering per gap kind.
//!
//! Tier 1 is the highest-trust category for the fact (direct observation
//! before inference); later tiers broaden the net.

use lacuna_core::models::{DocumentCategory, GapKind};

use DocumentCategory::*;

/// Ordered tiers for a gap kind. Within a tier, temporal proximity and
/// conversion cost decide; across tiers, order is absolute.
pub fn tiers_for(kind: GapKind) -> &'static [&'static [DocumentCategory]] {
    match kind {
        // The surgeon's own record first, then what imaging inferred.
        GapKind::ExtentOfResection => &[
            &[OperativeRecord],
            &[ImagingReport],
            &[DischargeSummary],
            &[ProgressNote, Other],
        ],
        GapKind::RadiationCourse => &[
            &[TreatmentPlan],
            &[DischargeSummary],
            &[ProgressNote],
            &[Other],
        ],
        GapKind::SystemicTherapy => &[
            &[TreatmentPlan, ProgressNote],
            &[DischargeSummary],
            &[Other],
        ],
    }
}

/// The tiers swept when the gap has no anchor date (tier 1 and 2 only,
/// unordered — the recall-preserving fallback).
pub const NULL_ANCHOR_TIER_DEPTH: usize = 2;

//! Static requirement tables: which facts each event kind must carry,
//! and the fixed priority class per gap kind.

use lacuna_core::models::{GapKind, GapPriority};
use lacuna_core::timeline::EventKind;

/// Required fact names for an operative event.
pub const OPERATIVE_FACTS: &[&str] = &["extent_of_resection", "surgeon_assessment"];

/// Required fact names for a radiation course.
pub const RADIATION_FACTS: &[&str] = &["start_date", "stop_date", "total_dose", "course_type"];

/// Required fact names for a systemic therapy course.
pub const SYSTEMIC_FACTS: &[&str] = &["start_date", "stop_date", "regimen"];

/// The gap kind and required-fact set an event kind maps to.
/// Event kinds with no extraction target return `None`.
pub fn required_facts(kind: EventKind) -> Option<(GapKind, &'static [&'static str])> {
    match kind {
        EventKind::Operative => Some((GapKind::ExtentOfResection, OPERATIVE_FACTS)),
        EventKind::RadiationCourse => Some((GapKind::RadiationCourse, RADIATION_FACTS)),
        EventKind::SystemicTherapy => Some((GapKind::SystemicTherapy, SYSTEMIC_FACTS)),
        EventKind::Imaging | EventKind::Other => None,
    }
}

/// Static priority table. Assigned, never computed.
pub fn priority_for(kind: GapKind) -> GapPriority {
    match kind {
        GapKind::ExtentOfResection => GapPriority::Highest,
        GapKind::RadiationCourse => GapPriority::High,
        GapKind::SystemicTherapy => GapPriority::Medium,
    }
}

/// Lacuna engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output artifact schema version. Bump only on breaking schema changes
/// so downstream diffing keeps working across runs.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

/// Days of start-date drift beyond which an extracted interval is treated
/// as a different treatment episode rather than the anchored one.
pub const MATERIAL_DATE_MISMATCH_DAYS: i64 = 60;

/// Day distance treated as one ordinal step when adjudicating date facts.
pub const DATE_STEP_DAYS: i64 = 7;

/// Maximum oracle invocations per candidate (initial call + one retry).
pub const MAX_CALLS_PER_CANDIDATE: u32 = 2;

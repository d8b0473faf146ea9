//! Default values shared by the config structs.

/// Candidates tried after the primary target, per gap.
pub const DEFAULT_MAX_CANDIDATES_AFTER_PRIMARY: usize = 5;

/// Minimum case-insensitive vocabulary hits for content relevance.
pub const DEFAULT_MIN_TERM_MATCHES: usize = 2;

/// Oracle invocations allowed per subject run, retries included.
pub const DEFAULT_ORACLE_CALL_BUDGET: u32 = 60;

/// Concurrent oracle calls permitted across subject runs.
pub const DEFAULT_ORACLE_PERMITS: usize = 4;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Extraction orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum vocabulary hits for a document to pass content validation.
    pub min_term_matches: usize,
    /// Per-run cap on oracle invocations, retries included. When spent,
    /// remaining gaps terminate without further candidate attempts.
    pub oracle_call_budget: u32,
    /// Concurrent oracle calls allowed across subject runs.
    pub oracle_permits: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_term_matches: defaults::DEFAULT_MIN_TERM_MATCHES,
            oracle_call_budget: defaults::DEFAULT_ORACLE_CALL_BUDGET,
            oracle_permits: defaults::DEFAULT_ORACLE_PERMITS,
        }
    }
}

use serde::{Deserialize, Serialize};

use super::defaults;

/// Candidate ranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Cap on candidates returned after the primary target.
    pub max_candidates_after_primary: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_candidates_after_primary: defaults::DEFAULT_MAX_CANDIDATES_AFTER_PRIMARY,
        }
    }
}

impl RankingConfig {
    /// Total candidate cap: the primary target plus the configured tail.
    pub fn candidate_cap(&self) -> usize {
        1 + self.max_candidates_after_primary
    }
}

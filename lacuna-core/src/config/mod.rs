pub mod defaults;
pub mod extraction_config;
pub mod ranking_config;

pub use extraction_config::ExtractionConfig;
pub use ranking_config::RankingConfig;

use serde::{Deserialize, Serialize};

use crate::errors::LacunaResult;

/// Aggregate engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LacunaConfig {
    pub ranking: RankingConfig,
    pub extraction: ExtractionConfig,
}

impl LacunaConfig {
    /// Parse a TOML document; absent keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> LacunaResult<Self> {
        Ok(toml::from_str(raw)?)
    }
}

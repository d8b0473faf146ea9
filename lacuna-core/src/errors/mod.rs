pub mod fetch_error;
pub mod oracle_error;
pub mod timeline_error;

pub use fetch_error::FetchError;
pub use oracle_error::OracleError;
pub use timeline_error::TimelineError;

/// Top-level error for the Lacuna engine.
///
/// Per-gap failures never surface here: every gap independently reaches a
/// terminal status inside the orchestrator. This type covers boundary
/// failures only (bad config, artifact serialization, integration bugs).
#[derive(Debug, thiserror::Error)]
pub enum LacunaError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LacunaResult<T> = Result<T, LacunaError>;

//! # lacuna-core
//!
//! Foundation crate for the Lacuna fact-extraction engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod facts;
pub mod models;
pub mod timeline;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LacunaConfig;
pub use errors::{LacunaError, LacunaResult};
pub use facts::FactValue;
pub use models::{
    AdjudicationRecord, CandidateDocument, ConfidenceLabel, DocumentCategory, Gap, GapKind,
    GapPriority, GapStatus, ProvenanceRecord, SourceCategory, SourceRecord,
};
pub use timeline::{Event, EventKind, Timeline};

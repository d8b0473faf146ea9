pub mod artifact;
pub mod attempt;
pub mod candidate;
pub mod gap;
pub mod oracle;
pub mod provenance;
pub mod source_record;

pub use artifact::{GapManifestEntry, SubjectArtifact};
pub use attempt::{AttemptRecord, CandidateOutcome, ExhaustionReason};
pub use candidate::{CandidateDocument, ContentFormat, DocumentCategory, RawDocument};
pub use gap::{Gap, GapKind, GapPriority, GapStatus};
pub use oracle::{ConfidenceLabel, OracleResponse};
pub use provenance::{AdjudicationMethod, AdjudicationRecord, ProvenanceRecord};
pub use source_record::{ExtractionMethod, SourceCategory, SourceRecord};

/// Content-conversion collaborator failures.
///
/// Non-fatal to the run, fatal only to the current candidate attempt:
/// the orchestrator advances to the next candidate without retrying.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("document not found: {document_id}")]
    NotFound { document_id: String },

    #[error("unsupported format: {detail}")]
    UnsupportedFormat { detail: String },

    #[error("conversion failed: {detail}")]
    ConversionFailed { detail: String },
}

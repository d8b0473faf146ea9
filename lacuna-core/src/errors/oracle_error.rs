/// Extraction-oracle failures.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Syntactically malformed output. Retried once per candidate before
    /// the candidate counts as incomplete.
    #[error("malformed oracle output: {detail}")]
    Malformed { detail: String },

    /// The oracle is down or rate-limited beyond recovery. Aborts the
    /// remaining escalation for the run segment; affected gaps terminate
    /// as exhausted with a distinguishing reason code.
    #[error("oracle unavailable: {detail}")]
    Unavailable { detail: String },
}

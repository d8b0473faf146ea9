use crate::errors::OracleError;
use crate::models::OracleResponse;

/// The external text-to-structured-data extraction capability.
///
/// Treated as non-deterministic and expensive: the single costliest
/// operation in the pipeline. Implementations must not be assumed
/// synchronous-cheap; the orchestrator budgets every call.
pub trait IExtractionOracle: Send + Sync {
    /// Submit a prompt plus document text; returns structured fields with a
    /// confidence label, or an error the orchestrator maps to its taxonomy.
    fn invoke(&self, prompt: &str, document_text: &str) -> Result<OracleResponse, OracleError>;
}

use uuid::Uuid;

use crate::errors::FetchError;
use crate::models::ContentFormat;

/// Text produced by the content-conversion collaborator.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub text: String,
    /// Format the text actually came from (Image means OCR ran).
    pub format: ContentFormat,
}

/// Binary-to-text conversion of source documents (OCR, markup stripping).
/// Either succeeds and returns text, or fails for this candidate only.
pub trait IContentFetcher: Send + Sync {
    fn fetch(&self, document_id: Uuid) -> Result<FetchedDocument, FetchError>;
}

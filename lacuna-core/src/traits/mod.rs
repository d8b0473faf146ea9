pub mod fetcher;
pub mod oracle;
pub mod primer;

pub use fetcher::{FetchedDocument, IContentFetcher};
pub use oracle::IExtractionOracle;
pub use primer::IReferencePrimer;

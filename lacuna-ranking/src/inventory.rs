//! One-pass catalog build over a subject's documents.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use lacuna_core::models::{CandidateDocument, DocumentCategory, RawDocument};

use crate::classify::classify_document;

/// Every document available for a subject, bucketed by category.
/// Immutable after construction; read-only during escalation.
#[derive(Debug, Clone, Default)]
pub struct DocumentInventory {
    buckets: HashMap<DocumentCategory, Vec<CandidateDocument>>,
    total: usize,
}

impl DocumentInventory {
    /// Build the inventory in one pass. Duplicate uploads (same content
    /// hash) collapse to the first occurrence; no content filtering happens
    /// here — recall over precision.
    pub fn build(documents: &[RawDocument]) -> Self {
        let mut buckets: HashMap<DocumentCategory, Vec<CandidateDocument>> = HashMap::new();
        let mut seen_hashes: HashMap<String, Uuid> = HashMap::new();
        let mut total = 0usize;

        for raw in documents {
            let content_hash = blake3::hash(&raw.content).to_hex().to_string();
            if let Some(first) = seen_hashes.get(&content_hash) {
                debug!(duplicate = %raw.id, first = %first, "collapsed duplicate upload");
                continue;
            }
            seen_hashes.insert(content_hash.clone(), raw.id);

            let category = classify_document(&raw.type_hint, &raw.description);
            buckets.entry(category).or_default().push(CandidateDocument {
                id: raw.id,
                category,
                document_date: raw.document_date,
                format: raw.format,
                description: raw.description.clone(),
                content_hash,
            });
            total += 1;
        }

        debug!(total, buckets = buckets.len(), "inventory built");
        Self { buckets, total }
    }

    /// Documents in one category bucket, in catalog order.
    pub fn bucket(&self, category: DocumentCategory) -> &[CandidateDocument] {
        self.buckets.get(&category).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

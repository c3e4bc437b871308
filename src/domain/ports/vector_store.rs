use crate::domain::{errors::DomainError, NewDocument, ScoredDocument};
use async_trait::async_trait;

/// The two persisted template sets: the bulk-loaded primary set and the
/// operator-curated corrections kept separate from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Primary,
    Extra,
}

/// Owns template persistence. Implementations hold their own embedding
/// client and embed content at insert time and query text at search time;
/// callers never see raw vectors.
///
/// The store is append-only from the pipeline's point of view: existing
/// rows are never mutated or deleted at runtime. `truncate` exists solely
/// for the one-shot reload at process start.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Appends documents and returns the store-assigned ids, in input order.
    async fn add_documents(
        &self,
        collection: Collection,
        documents: &[NewDocument],
    ) -> Result<Vec<u64>, DomainError>;

    /// Similarity search over `collection`, ordered by distance ascending.
    async fn search(
        &self,
        collection: Collection,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError>;

    async fn truncate(&self, collection: Collection) -> Result<(), DomainError>;

    async fn count(&self, collection: Collection) -> Result<u64, DomainError>;
}

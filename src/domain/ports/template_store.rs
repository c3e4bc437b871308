use crate::domain::{errors::DomainError, IndexedDocument};
use async_trait::async_trait;

/// Read path over the primary template set: fetch stored rows by id list.
/// Missing ids are simply absent from the result; the caller decides
/// whether an empty result is an error.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<IndexedDocument>, DomainError>;
}

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::{
    ports::{Collection, EmbeddingService, TemplateStore, VectorStore},
    DomainError, Embedding, IndexedDocument, NewDocument, ScoredDocument,
};

/// In-memory store with brute-force cosine search, for tests and local
/// runs without a qdrant instance. Mirrors the qdrant adapter's id and
/// ordering behavior.
pub struct InMemoryVectorStore {
    embedding: Arc<dyn EmbeddingService>,
    primary: RwLock<Vec<(IndexedDocument, Embedding)>>,
    extra: RwLock<Vec<(IndexedDocument, Embedding)>>,
    next_primary_id: AtomicU64,
    next_extra_id: AtomicU64,
}

impl InMemoryVectorStore {
    pub fn new(embedding: Arc<dyn EmbeddingService>) -> Self {
        Self {
            embedding,
            primary: RwLock::new(Vec::new()),
            extra: RwLock::new(Vec::new()),
            next_primary_id: AtomicU64::new(0),
            next_extra_id: AtomicU64::new(0),
        }
    }

    fn rows(&self, collection: Collection) -> &RwLock<Vec<(IndexedDocument, Embedding)>> {
        match collection {
            Collection::Primary => &self.primary,
            Collection::Extra => &self.extra,
        }
    }

    fn id_counter(&self, collection: Collection) -> &AtomicU64 {
        match collection {
            Collection::Primary => &self.next_primary_id,
            Collection::Extra => &self.next_extra_id,
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add_documents(
        &self,
        collection: Collection,
        documents: &[NewDocument],
    ) -> Result<Vec<u64>, DomainError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        let mut rows = self
            .rows(collection)
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let counter = self.id_counter(collection);
        let mut ids = Vec::with_capacity(documents.len());
        for (document, embedding) in documents.iter().zip(embeddings) {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            rows.push((
                IndexedDocument {
                    id,
                    content: document.content.clone(),
                    metadata: document.metadata.clone(),
                },
                embedding,
            ));
            ids.push(id);
        }

        Ok(ids)
    }

    async fn search(
        &self,
        collection: Collection,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        let query_embedding = self.embedding.embed(query).await?;

        let rows = self
            .rows(collection)
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut hits: Vec<ScoredDocument> = rows
            .iter()
            .map(|(document, embedding)| ScoredDocument {
                document: document.clone(),
                distance: query_embedding.cosine_distance(embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(hits.into_iter().take(top_k).collect())
    }

    async fn truncate(&self, collection: Collection) -> Result<(), DomainError> {
        self.rows(collection)
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .clear();
        self.id_counter(collection).store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, DomainError> {
        Ok(self
            .rows(collection)
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?
            .len() as u64)
    }
}

#[async_trait]
impl TemplateStore for InMemoryVectorStore {
    async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<IndexedDocument>, DomainError> {
        let rows = self
            .primary
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(rows
            .iter()
            .filter(|(document, _)| ids.contains(&document.id))
            .map(|(document, _)| document.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::FaqTemplate;

    /// Maps exact texts to fixed vectors so distances are known up front.
    struct StubEmbedding {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl StubEmbedding {
        fn new(pairs: &[(&str, &[f32])]) -> Arc<Self> {
            Arc::new(Self {
                vectors: pairs
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.to_vec()))
                    .collect(),
            })
        }

        fn lookup(&self, text: &str) -> Result<Embedding, DomainError> {
            self.vectors
                .get(text)
                .cloned()
                .map(Embedding::new)
                .ok_or_else(|| DomainError::internal(format!("no stub vector for {text:?}")))
        }
    }

    #[async_trait]
    impl EmbeddingService for StubEmbedding {
        async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
            self.lookup(text)
        }

        async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
            texts.iter().map(|t| self.lookup(t)).collect()
        }

        fn dimension(&self) -> usize {
            3
        }
    }

    fn template(question: &str) -> FaqTemplate {
        FaqTemplate {
            main_category: "Карты".into(),
            sub_category: "".into(),
            question: question.into(),
            priority: "1".into(),
            target_audience: "все".into(),
            template_answer: format!("ответ: {question}"),
        }
    }

    fn doc(question: &str) -> NewDocument {
        NewDocument::new(question, template(question))
    }

    #[tokio::test]
    async fn test_search_orders_by_distance_ascending() {
        let embedding = StubEmbedding::new(&[
            ("exact", &[1.0, 0.0, 0.0]),
            ("close", &[0.9, 0.1, 0.0]),
            ("far", &[0.0, 1.0, 0.0]),
            ("query", &[1.0, 0.0, 0.0]),
        ]);
        let store = InMemoryVectorStore::new(embedding);

        store
            .add_documents(Collection::Primary, &[doc("far"), doc("exact"), doc("close")])
            .await
            .unwrap();

        let hits = store.search(Collection::Primary, "query", 3).await.unwrap();

        let questions: Vec<&str> = hits.iter().map(|h| h.document.content.as_str()).collect();
        assert_eq!(questions, vec!["exact", "close", "far"]);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!(hits[0].distance.abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let embedding = StubEmbedding::new(&[
            ("primary doc", &[1.0, 0.0, 0.0]),
            ("extra doc", &[1.0, 0.0, 0.0]),
            ("query", &[1.0, 0.0, 0.0]),
        ]);
        let store = InMemoryVectorStore::new(embedding);

        store
            .add_documents(Collection::Primary, &[doc("primary doc")])
            .await
            .unwrap();
        store
            .add_documents(Collection::Extra, &[doc("extra doc")])
            .await
            .unwrap();

        let hits = store.search(Collection::Primary, "query", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.content, "primary doc");

        assert_eq!(store.count(Collection::Extra).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_by_ids_reads_the_primary_collection() {
        let embedding = StubEmbedding::new(&[
            ("a", &[1.0, 0.0, 0.0]),
            ("b", &[0.0, 1.0, 0.0]),
        ]);
        let store = InMemoryVectorStore::new(embedding);

        let ids = store
            .add_documents(Collection::Primary, &[doc("a"), doc("b")])
            .await
            .unwrap();

        let fetched = store.fetch_by_ids(&[ids[1], 999]).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].content, "b");

        assert!(store.fetch_by_ids(&[999]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_truncate_resets_rows_and_ids() {
        let embedding = StubEmbedding::new(&[("a", &[1.0, 0.0, 0.0])]);
        let store = InMemoryVectorStore::new(embedding);

        store
            .add_documents(Collection::Primary, &[doc("a")])
            .await
            .unwrap();
        store.truncate(Collection::Primary).await.unwrap();

        assert_eq!(store.count(Collection::Primary).await.unwrap(), 0);
        let ids = store
            .add_documents(Collection::Primary, &[doc("a")])
            .await
            .unwrap();
        assert_eq!(ids, vec![0]);
    }
}

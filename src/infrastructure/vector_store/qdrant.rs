use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    point_id::PointIdOptions, CreateCollectionBuilder, Distance, GetPointsBuilder, PointId,
    PointStruct, SearchPointsBuilder, UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};

use crate::domain::{
    ports::{Collection, EmbeddingService, TemplateStore, VectorStore},
    DomainError, FaqTemplate, IndexedDocument, NewDocument, ScoredDocument,
};
use crate::infrastructure::config::QdrantConfig;

/// Qdrant-backed template store. Two collections share one embedding
/// client: the bulk-loaded primary set and the operator-curated extra set.
///
/// Point ids are assigned by this adapter from per-collection counters
/// seeded with the stored point count, so they stay dense and numeric the
/// way the HTTP contract exposes them.
pub struct QdrantVectorStore {
    client: Qdrant,
    embedding: Arc<dyn EmbeddingService>,
    primary: String,
    extra: String,
    dimension: usize,
    next_primary_id: AtomicU64,
    next_extra_id: AtomicU64,
}

impl QdrantVectorStore {
    pub async fn new(
        config: &QdrantConfig,
        embedding: Arc<dyn EmbeddingService>,
    ) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(&config.url)
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let store = Self {
            client,
            dimension: embedding.dimension(),
            embedding,
            primary: config.primary_collection.clone(),
            extra: config.extra_collection.clone(),
            next_primary_id: AtomicU64::new(0),
            next_extra_id: AtomicU64::new(0),
        };

        store.ensure_collection(&store.primary).await?;
        store.ensure_collection(&store.extra).await?;
        store
            .next_primary_id
            .store(store.point_count(&store.primary).await?, Ordering::SeqCst);
        store
            .next_extra_id
            .store(store.point_count(&store.extra).await?, Ordering::SeqCst);

        Ok(store)
    }

    fn collection_name(&self, collection: Collection) -> &str {
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

    async fn ensure_collection(&self, name: &str) -> Result<(), DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let exists = collections.collections.iter().any(|c| c.name == name);

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
                        self.dimension as u64,
                        Distance::Cosine,
                    )),
                )
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        Ok(())
    }

    async fn point_count(&self, name: &str) -> Result<u64, DomainError> {
        let info = self
            .client
            .collection_info(name)
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(info.result.and_then(|r| r.points_count).unwrap_or(0))
    }

    fn build_payload(content: &str, metadata: &FaqTemplate) -> Result<Payload, DomainError> {
        serde_json::json!({
            "content": content,
            "mainCategory": metadata.main_category,
            "subCategory": metadata.sub_category,
            "question": metadata.question,
            "priority": metadata.priority,
            "targetAudience": metadata.target_audience,
            "templateAnswer": metadata.template_answer,
        })
        .try_into()
        .map_err(|_| DomainError::internal("Failed to create payload"))
    }

    fn parse_payload(payload: &HashMap<String, Value>) -> Option<(String, FaqTemplate)> {
        let field = |key: &str| Some(payload.get(key)?.as_str()?.to_string());

        let content = field("content")?;
        let metadata = FaqTemplate {
            main_category: field("mainCategory")?,
            sub_category: field("subCategory")?,
            question: field("question")?,
            priority: field("priority")?,
            target_audience: field("targetAudience")?,
            template_answer: field("templateAnswer")?,
        };
        Some((content, metadata))
    }

    fn numeric_id(id: Option<&PointId>) -> Option<u64> {
        match id?.point_id_options.as_ref()? {
            PointIdOptions::Num(n) => Some(*n),
            PointIdOptions::Uuid(_) => None,
        }
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
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

        let counter = self.id_counter(collection);
        let mut ids = Vec::with_capacity(documents.len());
        let mut points = Vec::with_capacity(documents.len());
        for (document, embedding) in documents.iter().zip(embeddings.iter()) {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            let payload = Self::build_payload(&document.content, &document.metadata)?;
            points.push(PointStruct::new(id, embedding.as_slice().to_vec(), payload));
            ids.push(id);
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(
                self.collection_name(collection),
                points,
            ))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(ids)
    }

    async fn search(
        &self,
        collection: Collection,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        let query_embedding = self.embedding.embed(query).await?;

        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    self.collection_name(collection),
                    query_embedding.as_slice().to_vec(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let hits = results
            .result
            .into_iter()
            .filter_map(|point| {
                let id = Self::numeric_id(point.id.as_ref())?;
                let (content, metadata) = Self::parse_payload(&point.payload)?;
                Some(ScoredDocument {
                    document: IndexedDocument {
                        id,
                        content,
                        metadata,
                    },
                    // qdrant reports cosine similarity; the domain speaks distance
                    distance: 1.0 - point.score,
                })
            })
            .collect();

        Ok(hits)
    }

    async fn truncate(&self, collection: Collection) -> Result<(), DomainError> {
        let name = self.collection_name(collection).to_string();

        self.client
            .delete_collection(&name)
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;
        self.ensure_collection(&name).await?;
        self.id_counter(collection).store(0, Ordering::SeqCst);

        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, DomainError> {
        self.point_count(self.collection_name(collection)).await
    }
}

#[async_trait]
impl TemplateStore for QdrantVectorStore {
    async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<IndexedDocument>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let point_ids: Vec<PointId> = ids.iter().map(|&id| PointId::from(id)).collect();

        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.primary, point_ids)
                    .with_payload(true)
                    .with_vectors(false),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| {
                let id = Self::numeric_id(point.id.as_ref())?;
                let (content, metadata) = Self::parse_payload(&point.payload)?;
                Some(IndexedDocument {
                    id,
                    content,
                    metadata,
                })
            })
            .collect())
    }
}

use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{
    ports::{Collection, TemplateStore, VectorStore},
    DomainError, NewDocument, TemplateEdit,
};

/// Persists operator-approved answer edits as new template variants.
///
/// Corrections are appended to the extra collection, never written over
/// the bulk-loaded rows, so curated variants stay reviewable separately
/// from the original import.
pub struct SubmissionService {
    templates: Arc<dyn TemplateStore>,
    store: Arc<dyn VectorStore>,
}

impl SubmissionService {
    pub fn new(templates: Arc<dyn TemplateStore>, store: Arc<dyn VectorStore>) -> Self {
        Self { templates, store }
    }

    #[instrument(skip(self, standalone_question, edits), fields(edit_count = edits.len()))]
    pub async fn add_new_templates(
        &self,
        standalone_question: &str,
        edits: &[TemplateEdit],
    ) -> Result<(), DomainError> {
        if edits.is_empty() {
            return Ok(());
        }

        let ids = parse_ids(edits)?;
        let existing = self.templates.fetch_by_ids(&ids).await?;
        if existing.is_empty() {
            return Err(DomainError::not_found("no matching templates found"));
        }

        let documents: Vec<NewDocument> = existing
            .iter()
            .filter_map(|doc| {
                let edit = edits
                    .iter()
                    .find(|e| e.template_id == doc.id.to_string())?;
                Some(NewDocument::new(
                    standalone_question,
                    doc.metadata.with_answer(&*edit.new_answer),
                ))
            })
            .collect();

        let inserted = self
            .store
            .add_documents(Collection::Extra, &documents)
            .await?;
        info!(count = inserted.len(), "stored operator-curated template variants");

        Ok(())
    }
}

fn parse_ids(edits: &[TemplateEdit]) -> Result<Vec<u64>, DomainError> {
    edits
        .iter()
        .map(|e| {
            e.template_id
                .parse::<u64>()
                .map_err(|_| DomainError::validation(format!("invalid template id: {}", e.template_id)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::{FaqTemplate, IndexedDocument, ScoredDocument};

    fn template(answer: &str) -> FaqTemplate {
        FaqTemplate {
            main_category: "Переводы".into(),
            sub_category: "SWIFT".into(),
            question: "Как перевести USD?".into(),
            priority: "1".into(),
            target_audience: "физлица".into(),
            template_answer: answer.into(),
        }
    }

    fn edit(id: &str, answer: &str) -> TemplateEdit {
        TemplateEdit {
            template_id: id.into(),
            new_answer: answer.into(),
        }
    }

    struct FakeTemplateStore {
        rows: Vec<IndexedDocument>,
    }

    #[async_trait]
    impl TemplateStore for FakeTemplateStore {
        async fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<IndexedDocument>, DomainError> {
            Ok(self
                .rows
                .iter()
                .filter(|r| ids.contains(&r.id))
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        inserts: Mutex<Vec<(Collection, Vec<NewDocument>)>>,
    }

    impl RecordingStore {
        fn inserts(&self) -> Vec<(Collection, Vec<NewDocument>)> {
            self.inserts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorStore for RecordingStore {
        async fn add_documents(
            &self,
            collection: Collection,
            documents: &[NewDocument],
        ) -> Result<Vec<u64>, DomainError> {
            self.inserts
                .lock()
                .unwrap()
                .push((collection, documents.to_vec()));
            Ok((0..documents.len() as u64).collect())
        }

        async fn search(
            &self,
            _collection: Collection,
            _query: &str,
            _top_k: usize,
        ) -> Result<Vec<ScoredDocument>, DomainError> {
            Ok(Vec::new())
        }

        async fn truncate(&self, _collection: Collection) -> Result<(), DomainError> {
            Ok(())
        }

        async fn count(&self, _collection: Collection) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    fn service(rows: Vec<IndexedDocument>) -> (SubmissionService, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        let service = SubmissionService::new(
            Arc::new(FakeTemplateStore { rows }),
            store.clone(),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_empty_edit_list_is_a_noop() {
        let (service, store) = service(vec![]);

        service.add_new_templates("вопрос", &[]).await.unwrap();

        assert!(store.inserts().is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_ids_fail_with_not_found_and_zero_writes() {
        let (service, store) = service(vec![]);

        let err = service
            .add_new_templates("вопрос", &[edit("42", "new answer")])
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(store.inserts().is_empty());
    }

    #[tokio::test]
    async fn test_variants_land_in_the_extra_collection() {
        let row = IndexedDocument {
            id: 7,
            content: "Как перевести USD?".into(),
            metadata: template("старый ответ"),
        };
        let (service, store) = service(vec![row]);

        service
            .add_new_templates("Как перевести 100 USD за границу?", &[edit("7", "новый ответ")])
            .await
            .unwrap();

        let inserts = store.inserts();
        assert_eq!(inserts.len(), 1);
        let (collection, documents) = &inserts[0];
        assert_eq!(*collection, Collection::Extra);
        assert_eq!(documents.len(), 1);
        // content is the operator-approved standalone question
        assert_eq!(documents[0].content, "Как перевести 100 USD за границу?");
        // metadata keeps everything except the answer
        assert_eq!(documents[0].metadata.template_answer, "новый ответ");
        assert_eq!(documents[0].metadata.main_category, "Переводы");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_a_validation_error() {
        let (service, store) = service(vec![]);

        let err = service
            .add_new_templates("вопрос", &[edit("r1-1", "ответ")])
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(store.inserts().is_empty());
    }
}

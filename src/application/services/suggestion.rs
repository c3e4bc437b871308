use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::prompts;
use crate::domain::{
    ports::{Collection, LlmService, VectorStore},
    DomainError, SuggestionResult,
};

/// Ranked suggestions for one operator question, together with the
/// rewritten question the retrieval actually ran against.
#[derive(Debug, Clone)]
pub struct Suggestions {
    pub entries: Vec<SuggestionResult>,
    pub standalone_question: String,
}

/// The suggestion pipeline: normalize, rewrite standalone, retrieve.
///
/// The stages run strictly in sequence; each stage's output is the sole
/// input of the next. There are no retries — a failed remote call fails
/// the whole run. The pipeline is read-only against the store.
pub struct SuggestionPipeline {
    llm: Arc<dyn LlmService>,
    store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl SuggestionPipeline {
    pub fn new(llm: Arc<dyn LlmService>, store: Arc<dyn VectorStore>, top_k: usize) -> Self {
        Self { llm, store, top_k }
    }

    #[instrument(skip(self, original_question))]
    pub async fn suggest(&self, original_question: &str) -> Result<Suggestions, DomainError> {
        if original_question.trim().is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        let normalized = self.normalize(original_question).await?;
        debug!(%normalized, "normalization stage done");

        let standalone = self.make_standalone(&normalized).await?;
        debug!(%standalone, "standalone stage done");

        let hits = self
            .store
            .search(Collection::Primary, &standalone, self.top_k)
            .await?;

        // The store returns nearest-first; keep its ordering as the rank.
        let entries = hits.into_iter().map(SuggestionResult::from_hit).collect();

        Ok(Suggestions {
            entries,
            standalone_question: standalone,
        })
    }

    async fn normalize(&self, question: &str) -> Result<String, DomainError> {
        let response = self
            .llm
            .complete_with_system(&prompts::normalization_prompt(), question)
            .await?;
        Ok(prompts::strip_wrapper(&response))
    }

    async fn make_standalone(&self, normalized: &str) -> Result<String, DomainError> {
        let response = self
            .llm
            .complete_with_system(prompts::standalone_prompt(), normalized)
            .await?;
        Ok(prompts::strip_wrapper(&response))
    }
}

use std::sync::Arc;

use crate::application::{SubmissionService, SuggestionPipeline};
use crate::domain::ports::VectorStore;
use crate::infrastructure::Config;

/// Shared handles, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub suggestions: Arc<SuggestionPipeline>,
    pub submissions: Arc<SubmissionService>,
    pub store: Arc<dyn VectorStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        suggestions: Arc<SuggestionPipeline>,
        submissions: Arc<SubmissionService>,
        store: Arc<dyn VectorStore>,
        config: Config,
    ) -> Self {
        Self {
            suggestions,
            submissions,
            store,
            config: Arc::new(config),
        }
    }
}

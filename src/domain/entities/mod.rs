mod embedding;
mod template;

pub use embedding::Embedding;
pub use template::{
    relevance_percent, FaqTemplate, IndexedDocument, NewDocument, ScoredDocument,
    SuggestionResult, TemplateEdit,
};

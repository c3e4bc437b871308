mod embedding;
mod llm;
mod template_store;
mod vector_store;

pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use template_store::TemplateStore;
pub use vector_store::{Collection, VectorStore};

pub mod config;
pub mod embedding;
pub mod llm;
pub mod vector_store;

pub use config::Config;
pub use embedding::TextEmbedding;
pub use llm::OpenAiLlm;
pub use vector_store::{InMemoryVectorStore, QdrantVectorStore};

use std::path::PathBuf;
use serde::Deserialize;

/// Environment-driven configuration, read once at startup.
///
/// Provider credentials (API key, base URL) are read by the rig client
/// from its own environment variables; this struct only carries model
/// names and wiring.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub qdrant: QdrantConfig,
    pub retrieval: RetrievalConfig,
    /// Tabular FAQ export loaded at boot.
    pub faq_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QdrantConfig {
    pub url: String,
    pub primary_collection: String,
    pub extra_collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_or("SERVER_PORT", "8080").parse()?,
            },
            llm: LlmConfig {
                model: env_or("LLM_MODEL", "gpt-4o-mini"),
                timeout_seconds: env_or("LLM_TIMEOUT_SECONDS", "60").parse()?,
            },
            embedding: EmbeddingConfig {
                model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
                dimension: env_or("EMBEDDING_DIMENSION", "1536").parse()?,
            },
            qdrant: QdrantConfig {
                url: env_or("QDRANT_URL", "http://localhost:6334"),
                primary_collection: env_or("QDRANT_COLLECTION", "documents"),
                extra_collection: env_or("QDRANT_COLLECTION_EXTRA", "documents_extra"),
            },
            retrieval: RetrievalConfig {
                top_k: env_or("RETRIEVAL_TOP_K", "5").parse()?,
            },
            faq_file: env_or("FAQ_FILE", "data/faq_export.csv").into(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            llm: LlmConfig {
                model: "gpt-4o-mini".to_string(),
                timeout_seconds: 60,
            },
            embedding: EmbeddingConfig {
                model: "text-embedding-3-small".to_string(),
                dimension: 1536,
            },
            qdrant: QdrantConfig {
                url: "http://localhost:6334".to_string(),
                primary_collection: "documents".to_string(),
                extra_collection: "documents_extra".to_string(),
            },
            retrieval: RetrievalConfig { top_k: 5 },
            faq_file: "data/faq_export.csv".into(),
        }
    }
}

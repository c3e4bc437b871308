use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use support_triage::api::{create_router, AppState};
use support_triage::application::{ImportService, SubmissionService, SuggestionPipeline};
use support_triage::infrastructure::{Config, OpenAiLlm, QdrantVectorStore, TextEmbedding};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,support_triage=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let llm = Arc::new(OpenAiLlm::from_config(&config.llm));
    let embedding = Arc::new(TextEmbedding::from_config(&config.embedding));
    let store = Arc::new(
        QdrantVectorStore::new(&config.qdrant, embedding)
            .await
            .context("connect to qdrant")?,
    );
    info!("Vector store initialized");

    // One-shot truncate-then-reload; the process must not serve without it.
    let imported = ImportService::new(store.clone())
        .load(&config.faq_file)
        .await
        .context("bulk FAQ import")?;
    info!(imported, "FAQ templates loaded");

    let suggestions = Arc::new(SuggestionPipeline::new(
        llm,
        store.clone(),
        config.retrieval.top_k,
    ));
    let submissions = Arc::new(SubmissionService::new(store.clone(), store.clone()));

    let addr = SocketAddr::new(
        config.server.host.parse().context("parse SERVER_HOST")?,
        config.server.port,
    );
    let state = AppState::new(suggestions, submissions, store, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

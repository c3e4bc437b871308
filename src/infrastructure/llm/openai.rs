use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai;
use std::time::Duration;

use crate::domain::{ports::LlmService, DomainError};
use crate::infrastructure::config::LlmConfig;

/// Chat-completion adapter over an OpenAI-compatible endpoint. Credentials
/// and base URL come from the provider's environment variables.
pub struct OpenAiLlm {
    model: String,
    timeout: Duration,
}

impl OpenAiLlm {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            timeout,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.model, Duration::from_secs(config.timeout_seconds))
    }
}

#[async_trait]
impl LlmService for OpenAiLlm {
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, DomainError> {
        let client = openai::Client::from_env();
        let agent = client.agent(&self.model).preamble(system).build();

        tokio::time::timeout(self.timeout, agent.prompt(prompt))
            .await
            .map_err(|_| DomainError::timeout("chat completion timed out"))?
            .map_err(|e| DomainError::external(e.to_string()))
    }
}

//! OpenAI chat completion backend.

use super::Generator;
use crate::config::ProviderSettings;
use crate::error::{Result, SatsangError};
use crate::openai::create_client_with_timeout;
use async_openai::types::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Chat-completion generator backed by the OpenAI API.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            client: create_client_with_timeout(Duration::from_secs(settings.timeout_seconds)),
            model: settings.openai_model.clone(),
            temperature: settings.temperature,
        }
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| SatsangError::Generation(format!("Failed to build message: {}", e)))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(vec![message.into()])
            .build()
            .map_err(|e| SatsangError::Generation(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SatsangError::OpenAI(format!("Chat API error: {}", e)))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| SatsangError::Generation("Empty completion response".to_string()))?;

        debug!("Generated {} chars", text.len());
        Ok(text)
    }

    fn provider(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

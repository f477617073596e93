//! Answer generation backends.
//!
//! A [`Generator`] turns a fully rendered prompt into guidance text. Two
//! hosted providers are supported; when neither is configured the engine
//! answers from the static topic tables instead and no generator is built.

mod gemini;
mod openai;

pub use gemini::GeminiGenerator;
pub use openai::OpenAIGenerator;

use crate::config::{ProviderKind, ProviderSettings};
use crate::error::{Result, SatsangError};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for LLM answer generation.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Provider identifier (for health reporting).
    fn provider(&self) -> &'static str;

    /// Model name in use.
    fn model(&self) -> String;
}

/// Build a generator for the configured provider, if any.
pub fn build_generator(settings: &ProviderSettings) -> Result<Option<Arc<dyn Generator>>> {
    match settings.kind {
        ProviderKind::Openai => Ok(Some(Arc::new(OpenAIGenerator::new(settings)))),
        ProviderKind::Gemini => {
            let key = std::env::var("GOOGLE_API_KEY").map_err(|_| {
                SatsangError::Config("GOOGLE_API_KEY is required for the Gemini provider".to_string())
            })?;
            Ok(Some(Arc::new(GeminiGenerator::new(settings, key)?)))
        }
        ProviderKind::None => Ok(None),
    }
}

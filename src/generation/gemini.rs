//! Google Gemini backend via the generative language REST API.

use super::Generator;
use crate::config::ProviderSettings;
use crate::error::{Result, SatsangError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Generator backed by the Gemini REST API.
pub struct GeminiGenerator {
    client: reqwest::Client,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiGenerator {
    pub fn new(settings: &ProviderSettings, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| SatsangError::Generation(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            model: settings.gemini_model.clone(),
            api_key,
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SatsangError::Generation(format!(
                "Gemini API returned {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|mut c| c.parts.drain(..).next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SatsangError::Generation("Empty Gemini response".to_string()))?;

        debug!("Generated {} chars", text.len());
        Ok(text)
    }

    fn provider(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

//! Configuration settings for Satsang.
//!
//! All values are loaded once at startup; nothing here mutates at runtime.
//! API keys are never stored in the config file — they come from the
//! `OPENAI_API_KEY` / `GOOGLE_API_KEY` environment variables.

use crate::error::{Result, SatsangError};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub language: LanguageSettings,
    pub provider: ProviderSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub ingest: IngestSettings,
    pub api: ApiSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.satsang".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Supported and default languages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    /// Languages the service answers in.
    pub supported: Vec<Language>,
    /// Fallback when detection is ambiguous or the input is too short.
    pub default: Language,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            supported: vec![Language::En, Language::Hi, Language::Te, Language::Kn],
            default: Language::En,
        }
    }
}

/// Generation backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions.
    #[default]
    Openai,
    /// Google Gemini.
    Gemini,
    /// No LLM; answer from the static topic table.
    None,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::Openai),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "none" | "static" | "simple" => Ok(ProviderKind::None),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Openai => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::None => write!(f, "none"),
        }
    }
}

/// Generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Which backend generates answers (openai, gemini, none).
    pub kind: ProviderKind,
    /// Chat model for the OpenAI backend.
    pub openai_model: String,
    /// Model for the Gemini backend.
    pub gemini_model: String,
    /// Generation temperature.
    pub temperature: f32,
    /// Per-request generation timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Openai,
            openai_model: "gpt-4o-mini".to_string(),
            gemini_model: "gemini-pro".to_string(),
            temperature: 0.3,
            timeout_seconds: 30,
        }
    }
}

impl ProviderSettings {
    /// Model name for the active provider.
    pub fn model_name(&self) -> &str {
        match self.kind {
            ProviderKind::Openai => &self.openai_model,
            ProviderKind::Gemini => &self.gemini_model,
            ProviderKind::None => "static",
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Multilingual embedding model.
    pub model: String,
    /// Embedding dimensions; every indexed chunk must match.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of passages retrieved per question.
    pub top_k: usize,
    /// Minimum similarity score for a passage to count.
    pub min_score: f32,
    /// Path to the SQLite chunk database.
    pub sqlite_path: String,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 4,
            min_score: 0.25,
            sqlite_path: "~/.satsang/teachings.db".to_string(),
        }
    }
}

/// Corpus ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Folder of plain-text teaching files.
    pub data_folder: String,
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters.
    pub chunk_overlap: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            data_folder: "./data".to_string(),
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SatsangError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("satsang")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded SQLite database path.
    pub fn sqlite_path(&self) -> PathBuf {
        Self::expand_path(&self.retrieval.sqlite_path)
    }

    /// Get the expanded corpus folder path.
    pub fn corpus_dir(&self) -> PathBuf {
        Self::expand_path(&self.ingest.data_folder)
    }

    /// Validate configuration invariants at startup, failing fast on a
    /// config that cannot serve requests correctly.
    pub fn validate(&self) -> Result<()> {
        if self.language.supported.is_empty() {
            return Err(SatsangError::Config(
                "At least one supported language is required".to_string(),
            ));
        }
        if !self.language.supported.contains(&self.language.default) {
            return Err(SatsangError::Config(format!(
                "Default language '{}' is not in the supported set",
                self.language.default
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(SatsangError::Config(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }
        if self.ingest.chunk_overlap >= self.ingest.chunk_size {
            return Err(SatsangError::Config(
                "ingest.chunk_overlap must be smaller than ingest.chunk_size".to_string(),
            ));
        }
        match self.provider.kind {
            ProviderKind::Openai => {
                if std::env::var("OPENAI_API_KEY").unwrap_or_default().is_empty() {
                    return Err(SatsangError::Config(
                        "OPENAI_API_KEY is required when using the OpenAI provider".to_string(),
                    ));
                }
            }
            ProviderKind::Gemini => {
                if std::env::var("GOOGLE_API_KEY").unwrap_or_default().is_empty() {
                    return Err(SatsangError::Config(
                        "GOOGLE_API_KEY is required when using the Gemini provider".to_string(),
                    ));
                }
            }
            ProviderKind::None => {}
        }
        Ok(())
    }
}

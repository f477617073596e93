//! Configuration management.

mod prompts;
mod settings;

pub use prompts::{GuidancePrompts, Prompts};
pub use settings::{
    ApiSettings, EmbeddingSettings, GeneralSettings, IngestSettings, LanguageSettings,
    ProviderKind, ProviderSettings, RetrievalSettings, Settings,
};

//! CLI command implementations.

mod ask;
mod config;
mod ingest;
mod serve;

pub use ask::run_ask;
pub use config::run_config;
pub use ingest::run_ingest;
pub use serve::run_serve;

use crate::config::{ProviderKind, Prompts, Settings};
use crate::embedding::OpenAIEmbedder;
use crate::engine::GuidanceEngine;
use crate::generation::build_generator;
use crate::vector_store::SqliteVectorStore;
use std::sync::Arc;

/// Assemble the guidance engine for the configured provider.
///
/// With no provider the engine runs in simple mode and neither the index
/// nor any API key is touched.
pub(crate) fn build_engine(settings: &Settings) -> crate::error::Result<GuidanceEngine> {
    settings.validate()?;
    let prompts = Prompts::load(None)?;

    if settings.provider.kind == ProviderKind::None {
        return GuidanceEngine::new(settings, prompts, None, None, None);
    }

    let dimensions = settings.embedding.dimensions as usize;
    let embedder = Arc::new(OpenAIEmbedder::new(&settings.embedding.model, dimensions));
    let store = Arc::new(SqliteVectorStore::new(&settings.sqlite_path(), dimensions)?);
    let generator = build_generator(&settings.provider)?;

    GuidanceEngine::new(settings, prompts, Some(embedder), Some(store), generator)
}

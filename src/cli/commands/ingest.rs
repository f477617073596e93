//! Ingest command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::OpenAIEmbedder;
use crate::ingest::IngestPipeline;
use crate::vector_store::SqliteVectorStore;
use anyhow::Result;

/// Run the ingest command: load, chunk, embed, and index the corpus.
pub async fn run_ingest(folder: Option<String>, settings: Settings) -> Result<()> {
    settings.validate()?;

    if std::env::var("OPENAI_API_KEY").is_err() {
        Output::error("OPENAI_API_KEY is required to embed the corpus.");
        anyhow::bail!("OPENAI_API_KEY not set");
    }

    let folder = folder
        .map(|f| Settings::expand_path(&f))
        .unwrap_or_else(|| settings.corpus_dir());

    let dimensions = settings.embedding.dimensions as usize;
    let embedder = OpenAIEmbedder::new(&settings.embedding.model, dimensions);
    let store = SqliteVectorStore::new(&settings.sqlite_path(), dimensions)?;

    let pipeline = IngestPipeline::new(
        &embedder,
        &store,
        settings.ingest.chunk_size,
        settings.ingest.chunk_overlap,
        settings.language.default,
    )?;

    Output::info(&format!("Loading corpus from {}", folder.display()));
    let documents = pipeline.load_corpus(&folder)?;
    if documents.is_empty() {
        Output::warning("No .txt files found in the data folder.");
        anyhow::bail!("Nothing to ingest");
    }
    Output::success(&format!("Loaded {} documents", documents.len()));

    let spinner = Output::spinner("Embedding and indexing...");
    let count = {
        let spinner = &spinner;
        pipeline
            .run(&documents, move |done| {
                spinner.set_message(format!("Indexed {} chunks", done));
            })
            .await?
    };
    spinner.finish_and_clear();

    Output::success(&format!("Index rebuilt with {} chunks", count));
    Output::kv("Database", &settings.sqlite_path().display().to_string());

    Ok(())
}

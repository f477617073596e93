//! Vector store abstraction for the teaching corpus.
//!
//! The index is read-mostly: it is built by ingestion, served lock-free from
//! an immutable snapshot, and replaced wholesale by `rebuild`. Searches are
//! cross-lingual by design — the multilingual embedding space is shared, so
//! a Hindi question may retrieve an English passage.

mod memory;
mod sqlite;

pub use memory::MemoryVectorStore;
pub use sqlite::SqliteVectorStore;

use crate::error::{Result, SatsangError};
use crate::language::Language;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable unit of ingested teaching text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingChunk {
    /// Unique chunk ID.
    pub id: Uuid,
    /// Text content (bounded by the configured chunk size at ingestion).
    pub text: String,
    /// Originating file or book.
    pub source: String,
    /// Page or section number, when known.
    pub page: Option<u32>,
    /// Language of the passage, when inferable; None for mixed corpora.
    pub language: Option<Language>,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// Position of this chunk within the ingestion run.
    pub chunk_order: i64,
    /// When this chunk was indexed.
    pub indexed_at: DateTime<Utc>,
}

impl TeachingChunk {
    pub fn new(
        text: String,
        source: String,
        page: Option<u32>,
        language: Option<Language>,
        embedding: Vec<f32>,
        chunk_order: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            source,
            page,
            language,
            embedding,
            chunk_order,
            indexed_at: Utc::now(),
        }
    }

    /// Short excerpt for citations and logs.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let flat = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= max_chars {
            flat
        } else {
            let cut: String = flat.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: TeachingChunk,
    /// Cosine similarity (higher is better).
    pub score: f32,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Search for the `k` most similar chunks. An empty index yields an
    /// empty result, never an error.
    async fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// Search with a minimum similarity threshold.
    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        k: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>>;

    /// Replace the entire index. In-flight searches keep the previous
    /// snapshot; the new index becomes visible atomically.
    async fn rebuild(&self, chunks: Vec<TeachingChunk>) -> Result<usize>;

    /// Total indexed chunks.
    async fn chunk_count(&self) -> Result<usize>;

    /// Configured embedding dimensionality.
    fn dimensions(&self) -> usize;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Rank a snapshot against a query embedding.
///
/// The sort is stable and keys on score alone, so equal scores keep the
/// snapshot's ingestion order.
pub(crate) fn rank_snapshot(
    chunks: &[TeachingChunk],
    query_embedding: &[f32],
    k: usize,
    min_score: f32,
) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = chunks
        .iter()
        .map(|chunk| SearchResult {
            score: cosine_similarity(query_embedding, &chunk.embedding),
            chunk: chunk.clone(),
        })
        .filter(|r| r.score >= min_score)
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(k);
    results
}

/// Reject chunks whose embeddings do not match the index dimensionality.
pub(crate) fn check_dimensions(chunks: &[TeachingChunk], dimensions: usize) -> Result<()> {
    for chunk in chunks {
        if chunk.embedding.len() != dimensions {
            return Err(SatsangError::VectorStore(format!(
                "Chunk {} has embedding dimension {} but index expects {}",
                chunk.id,
                chunk.embedding.len(),
                dimensions
            )));
        }
    }
    Ok(())
}

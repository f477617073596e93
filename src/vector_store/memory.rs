//! In-memory vector store.
//!
//! Holds the index as an immutable snapshot behind an `Arc`. Readers clone
//! the `Arc` under a brief lock and search without holding it, so a rebuild
//! never blocks or corrupts concurrent searches.

use super::{check_dimensions, rank_snapshot, SearchResult, TeachingChunk, VectorStore};
use crate::error::{Result, SatsangError};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::info;

/// In-memory snapshot-swap vector store.
pub struct MemoryVectorStore {
    snapshot: RwLock<Arc<Vec<TeachingChunk>>>,
    dimensions: usize,
}

impl MemoryVectorStore {
    /// Create an empty store with the given embedding dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Vec::new())),
            dimensions,
        }
    }

    fn current(&self) -> Result<Arc<Vec<TeachingChunk>>> {
        let guard = self
            .snapshot
            .read()
            .map_err(|e| SatsangError::VectorStore(format!("Failed to acquire lock: {}", e)))?;
        Ok(Arc::clone(&guard))
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, k, 0.0).await
    }

    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        k: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let snapshot = self.current()?;
        Ok(rank_snapshot(&snapshot, query_embedding, k, min_score))
    }

    async fn rebuild(&self, chunks: Vec<TeachingChunk>) -> Result<usize> {
        check_dimensions(&chunks, self.dimensions)?;
        let count = chunks.len();
        let fresh = Arc::new(chunks);

        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| SatsangError::VectorStore(format!("Failed to acquire lock: {}", e)))?;
        *guard = fresh;
        drop(guard);

        info!("Rebuilt in-memory index with {} chunks", count);
        Ok(count)
    }

    async fn chunk_count(&self) -> Result<usize> {
        Ok(self.current()?.len())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, source: &str, embedding: Vec<f32>, order: i64) -> TeachingChunk {
        TeachingChunk::new(text.to_string(), source.to_string(), None, None, embedding, order)
    }

    #[tokio::test]
    async fn test_empty_index_returns_empty_result() {
        let store = MemoryVectorStore::new(3);
        let results = store.search(&[1.0, 0.0, 0.0], 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        let store = MemoryVectorStore::new(2);
        store
            .rebuild(vec![
                chunk("a", "s", vec![1.0, 0.0], 0),
                chunk("b", "s", vec![0.8, 0.2], 1),
                chunk("c", "s", vec![0.0, 1.0], 2),
            ])
            .await
            .unwrap();

        let first = store.search(&[1.0, 0.0], 3).await.unwrap();
        let second = store.search(&[1.0, 0.0], 3).await.unwrap();

        let ids1: Vec<_> = first.iter().map(|r| r.chunk.id).collect();
        let ids2: Vec<_> = second.iter().map(|r| r.chunk.id).collect();
        assert_eq!(ids1, ids2);
        assert_eq!(first[0].chunk.text, "a");
    }

    #[tokio::test]
    async fn test_rebuild_rejects_wrong_dimensions() {
        let store = MemoryVectorStore::new(3);
        let err = store
            .rebuild(vec![chunk("a", "s", vec![1.0, 0.0], 0)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("dimension"));
    }

    #[tokio::test]
    async fn test_rebuild_replaces_wholesale() {
        let store = MemoryVectorStore::new(2);
        store.rebuild(vec![chunk("old", "s", vec![1.0, 0.0], 0)]).await.unwrap();
        store
            .rebuild(vec![
                chunk("new1", "s", vec![1.0, 0.0], 0),
                chunk("new2", "s", vec![0.0, 1.0], 1),
            ])
            .await
            .unwrap();

        assert_eq!(store.chunk_count().await.unwrap(), 2);
        let results = store.search(&[1.0, 0.0], 10).await.unwrap();
        assert!(results.iter().all(|r| r.chunk.text.starts_with("new")));
    }

    #[tokio::test]
    async fn test_concurrent_searches_during_rebuild_see_consistent_snapshot() {
        let store = Arc::new(MemoryVectorStore::new(2));
        store
            .rebuild((0..20).map(|i| chunk("old", "old-book", vec![1.0, 0.0], i)).collect())
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.search(&[1.0, 0.0], 20).await.unwrap()
            }));
        }

        let rebuilder = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .rebuild((0..20).map(|i| chunk("new", "new-book", vec![1.0, 0.0], i)).collect())
                    .await
                    .unwrap()
            })
        };

        for handle in handles {
            let results = handle.await.unwrap();
            assert_eq!(results.len(), 20);
            // Every result comes from exactly one snapshot, old or new.
            let source = &results[0].chunk.source;
            assert!(results.iter().all(|r| &r.chunk.source == source));
        }
        rebuilder.await.unwrap();
    }
}

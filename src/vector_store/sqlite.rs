//! SQLite-persisted vector store.
//!
//! Chunks and their embeddings persist in a single table so the index
//! survives restarts; similarity search runs against an in-memory snapshot
//! loaded at construction. A rebuild rewrites the table in one transaction
//! and then swaps the snapshot, so concurrent searches keep the previous
//! index until the swap.

use super::{check_dimensions, rank_snapshot, SearchResult, TeachingChunk, VectorStore};
use crate::error::{Result, SatsangError};
use crate::language::Language;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, instrument};

/// SQLite-backed vector store.
pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
    snapshot: RwLock<Arc<Vec<TeachingChunk>>>,
    dimensions: usize,
}

impl SqliteVectorStore {
    /// Open (or create) the store at `path` and load the persisted index.
    #[instrument(skip_all)]
    pub fn new(path: &Path, dimensions: usize) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::create_schema(&conn)?;

        let chunks = Self::load_chunks(&conn)?;
        info!(
            "Initialized SQLite vector store at {:?} ({} chunks)",
            path,
            chunks.len()
        );

        Ok(Self {
            conn: Mutex::new(conn),
            snapshot: RwLock::new(Arc::new(chunks)),
            dimensions,
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory(dimensions: usize) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::create_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            snapshot: RwLock::new(Arc::new(Vec::new())),
            dimensions,
        })
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                source TEXT NOT NULL,
                page INTEGER,
                language TEXT,
                embedding BLOB NOT NULL,
                chunk_order INTEGER NOT NULL,
                indexed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_chunks_order ON chunks(chunk_order);
            "#,
        )?;
        Ok(())
    }

    fn load_chunks(conn: &Connection) -> Result<Vec<TeachingChunk>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, text, source, page, language, embedding, chunk_order, indexed_at
            FROM chunks
            ORDER BY chunk_order
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let id_str: String = row.get(0)?;
            let language_str: Option<String> = row.get(4)?;
            let embedding_bytes: Vec<u8> = row.get(5)?;
            let indexed_at_str: String = row.get(7)?;

            Ok(TeachingChunk {
                id: uuid::Uuid::parse_str(&id_str).unwrap_or_default(),
                text: row.get(1)?,
                source: row.get(2)?,
                page: row.get(3)?,
                language: language_str.and_then(|s| s.parse::<Language>().ok()),
                embedding: Self::bytes_to_embedding(&embedding_bytes),
                chunk_order: row.get(6)?,
                indexed_at: DateTime::parse_from_rfc3339(&indexed_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn current(&self) -> Result<Arc<Vec<TeachingChunk>>> {
        let guard = self
            .snapshot
            .read()
            .map_err(|e| SatsangError::VectorStore(format!("Failed to acquire lock: {}", e)))?;
        Ok(Arc::clone(&guard))
    }

    /// Serialize embedding to little-endian f32 bytes.
    fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
        embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Deserialize embedding from bytes.
    fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
                f32::from_le_bytes(arr)
            })
            .collect()
    }
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, k, 0.0).await
    }

    #[instrument(skip(self, query_embedding))]
    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        k: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let snapshot = self.current()?;
        let results = rank_snapshot(&snapshot, query_embedding, k, min_score);
        debug!("Found {} matching chunks", results.len());
        Ok(results)
    }

    #[instrument(skip(self, chunks))]
    async fn rebuild(&self, chunks: Vec<TeachingChunk>) -> Result<usize> {
        check_dimensions(&chunks, self.dimensions)?;

        {
            let conn = self
                .conn
                .lock()
                .map_err(|e| SatsangError::VectorStore(format!("Failed to acquire lock: {}", e)))?;

            let tx = conn.unchecked_transaction()?;
            tx.execute("DELETE FROM chunks", [])?;

            for chunk in &chunks {
                tx.execute(
                    r#"
                    INSERT INTO chunks
                    (id, text, source, page, language, embedding, chunk_order, indexed_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        chunk.id.to_string(),
                        chunk.text,
                        chunk.source,
                        chunk.page,
                        chunk.language.map(|l| l.code()),
                        Self::embedding_to_bytes(&chunk.embedding),
                        chunk.chunk_order,
                        chunk.indexed_at.to_rfc3339(),
                    ],
                )?;
            }
            tx.commit()?;
        }

        let count = chunks.len();
        let fresh = Arc::new(chunks);
        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| SatsangError::VectorStore(format!("Failed to acquire lock: {}", e)))?;
        *guard = fresh;
        drop(guard);

        info!("Rebuilt index with {} chunks", count);
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
        TeachingChunk::new(
            text.to_string(),
            source.to_string(),
            Some(42),
            Some(Language::En),
            embedding,
            order,
        )
    }

    #[tokio::test]
    async fn test_rebuild_and_search() {
        let store = SqliteVectorStore::in_memory(3).unwrap();

        store
            .rebuild(vec![
                chunk("Faith is trust in God", "teachings.txt", vec![1.0, 0.0, 0.0], 0),
                chunk("Service purifies the heart", "teachings.txt", vec![0.0, 1.0, 0.0], 1),
            ])
            .await
            .unwrap();

        assert_eq!(store.chunk_count().await.unwrap(), 2);

        let results = store.search(&[1.0, 0.0, 0.0], 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!((results[0].score - 1.0).abs() < 0.001);
        assert_eq!(results[0].chunk.text, "Faith is trust in God");
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teachings.db");

        {
            let store = SqliteVectorStore::new(&path, 2).unwrap();
            store
                .rebuild(vec![chunk("Love transcends boundaries", "love.txt", vec![0.6, 0.8], 0)])
                .await
                .unwrap();
        }

        let reopened = SqliteVectorStore::new(&path, 2).unwrap();
        assert_eq!(reopened.chunk_count().await.unwrap(), 1);

        let results = reopened.search(&[0.6, 0.8], 1).await.unwrap();
        assert_eq!(results[0].chunk.source, "love.txt");
        assert_eq!(results[0].chunk.page, Some(42));
        assert_eq!(results[0].chunk.language, Some(Language::En));
        assert!((results[0].score - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_embedding_roundtrip() {
        let embedding = vec![0.1, -2.5, 3.75, 0.0];
        let bytes = SqliteVectorStore::embedding_to_bytes(&embedding);
        assert_eq!(SqliteVectorStore::bytes_to_embedding(&bytes), embedding);
    }

    #[tokio::test]
    async fn test_empty_store_searches_cleanly() {
        let store = SqliteVectorStore::in_memory(3).unwrap();
        let results = store.search(&[1.0, 0.0, 0.0], 5).await.unwrap();
        assert!(results.is_empty());
    }
}

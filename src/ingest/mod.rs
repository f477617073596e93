//! Corpus ingestion: load plain-text teachings, chunk, embed, and rebuild
//! the vector index.
//!
//! Ingestion replaces the whole index each run. Chunk boundaries prefer
//! whitespace near the window edge so words are not split mid-way; overlap
//! carries context across adjacent chunks.

use crate::embedding::Embedder;
use crate::error::{Result, SatsangError};
use crate::language::{Language, LanguageDetector};
use crate::vector_store::{TeachingChunk, VectorStore};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// A loaded source document before chunking.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub source: String,
    pub text: String,
}

/// Character-window chunker with whitespace-aware boundaries.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(SatsangError::Ingest("chunk_size must be positive".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(SatsangError::Ingest(
                "chunk_overlap must be smaller than chunk_size".to_string(),
            ));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Split text into overlapping character windows. Operates on chars, not
    /// bytes, so multi-byte scripts never split inside a code point.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let hard_end = (start + self.chunk_size).min(chars.len());
            let end = if hard_end < chars.len() {
                // Pull the boundary back to the nearest whitespace, but not
                // past the overlap region or the chunk degenerates.
                let floor = start + self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
                (floor..hard_end)
                    .rev()
                    .find(|&i| chars[i].is_whitespace())
                    .map(|i| i + 1)
                    .unwrap_or(hard_end)
            } else {
                hard_end
            };

            let chunk: String = chars[start..end].iter().collect();
            let trimmed = chunk.trim();
            if !trimmed.is_empty() {
                chunks.push(trimmed.to_string());
            }

            if end == chars.len() {
                break;
            }
            // Always make forward progress, even with extreme overlap.
            let next = end.saturating_sub(self.chunk_overlap);
            start = if next > start { next } else { end };
        }

        chunks
    }
}

/// Loads, chunks, embeds, and indexes the teaching corpus.
pub struct IngestPipeline<'a> {
    embedder: &'a dyn Embedder,
    store: &'a dyn VectorStore,
    chunker: TextChunker,
    detector: LanguageDetector,
}

impl<'a> IngestPipeline<'a> {
    pub fn new(
        embedder: &'a dyn Embedder,
        store: &'a dyn VectorStore,
        chunk_size: usize,
        chunk_overlap: usize,
        default_language: Language,
    ) -> Result<Self> {
        Ok(Self {
            embedder,
            store,
            chunker: TextChunker::new(chunk_size, chunk_overlap)?,
            detector: LanguageDetector::new(default_language),
        })
    }

    /// Load every `.txt` file under `folder`, recursively. Unreadable files
    /// are skipped with a warning; an unreadable folder is an error.
    #[instrument(skip(self))]
    pub fn load_corpus(&self, folder: &Path) -> Result<Vec<SourceDocument>> {
        if !folder.is_dir() {
            return Err(SatsangError::Ingest(format!(
                "Data folder not found: {}",
                folder.display()
            )));
        }

        let mut files = Vec::new();
        collect_txt_files(folder, &mut files)?;
        files.sort();

        let mut documents = Vec::new();
        for path in files {
            match std::fs::read_to_string(&path) {
                Ok(text) if !text.trim().is_empty() => {
                    let source = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    documents.push(SourceDocument { source, text });
                }
                Ok(_) => warn!("Skipping empty file: {}", path.display()),
                Err(e) => warn!("Failed to load {}: {}", path.display(), e),
            }
        }

        info!("Loaded {} documents from {}", documents.len(), folder.display());
        Ok(documents)
    }

    /// Chunk the documents, embed every chunk, and rebuild the index.
    /// Returns the number of indexed chunks. `on_progress` is called once
    /// per embedded chunk, for CLI progress reporting.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        documents: &[SourceDocument],
        mut on_progress: impl FnMut(usize),
    ) -> Result<usize> {
        let mut texts = Vec::new();
        let mut metadata = Vec::new();

        for doc in documents {
            for piece in self.chunker.split(&doc.text) {
                let language = self.detector.detect(&piece);
                metadata.push((doc.source.clone(), language));
                texts.push(piece);
            }
        }

        if texts.is_empty() {
            return Err(SatsangError::Ingest(
                "No text chunks produced from the corpus".to_string(),
            ));
        }

        info!("Embedding {} chunks", texts.len());
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(SatsangError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let mut chunks = Vec::with_capacity(texts.len());
        for (order, ((text, (source, language)), embedding)) in texts
            .into_iter()
            .zip(metadata.into_iter())
            .zip(embeddings.into_iter())
            .enumerate()
        {
            chunks.push(TeachingChunk::new(
                text,
                source,
                None,
                Some(language),
                embedding,
                order as i64,
            ));
            on_progress(order + 1);
        }

        let count = self.store.rebuild(chunks).await?;
        info!("Index rebuilt with {} chunks", count);
        Ok(count)
    }
}

fn collect_txt_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_txt_files(&path, out)?;
        } else if path.extension().map(|e| e == "txt").unwrap_or(false) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::MemoryVectorStore;
    use async_trait::async_trait;
    use std::io::Write;

    struct HashEmbedder;

    #[async_trait]
    impl Embedder for HashEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let len = text.len() as f32;
            Ok(vec![len, 1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::new();
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_chunker_respects_window_and_overlap() {
        let chunker = TextChunker::new(20, 5).unwrap();
        let text = "one two three four five six seven eight nine ten";
        let chunks = chunker.split(text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20);
        }
        // Overlap repeats trailing words at the head of the next chunk.
        let all = chunks.join(" ");
        assert!(all.matches("four").count() >= 1);
    }

    #[test]
    fn test_chunker_prefers_word_boundaries() {
        let chunker = TextChunker::new(12, 3).unwrap();
        let chunks = chunker.split("devotion faith service karma");
        for chunk in &chunks {
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
    }

    #[test]
    fn test_chunker_handles_multibyte_scripts() {
        let chunker = TextChunker::new(10, 2).unwrap();
        let chunks = chunker.split("भक्ति प्रेम और आत्मसमर्पण का मार्ग है");
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 10);
        }
    }

    #[test]
    fn test_chunker_rejects_bad_overlap() {
        assert!(TextChunker::new(100, 100).is_err());
        assert!(TextChunker::new(0, 0).is_err());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = TextChunker::new(500, 50).unwrap();
        let chunks = chunker.split("A short teaching.");
        assert_eq!(chunks, vec!["A short teaching.".to_string()]);
    }

    #[tokio::test]
    async fn test_pipeline_indexes_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("teachings.txt")).unwrap();
        writeln!(file, "Devotion is love in action. Service purifies the heart.").unwrap();

        let store = MemoryVectorStore::new(2);
        let embedder = HashEmbedder;
        let pipeline =
            IngestPipeline::new(&embedder, &store, 500, 50, Language::En).unwrap();

        let documents = pipeline.load_corpus(dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].source, "teachings.txt");

        let mut seen = 0;
        let count = pipeline.run(&documents, |done| seen = done).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(seen, 1);
        assert_eq!(store.chunk_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_pipeline_detects_chunk_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("hindi.txt"),
            "भक्ति प्रेम और आत्मसमर्पण का मार्ग है। भक्ति के माध्यम से व्यक्ति ईश्वर से जुड़ता है।",
        )
        .unwrap();

        let store = MemoryVectorStore::new(2);
        let embedder = HashEmbedder;
        let pipeline =
            IngestPipeline::new(&embedder, &store, 500, 50, Language::En).unwrap();

        let documents = pipeline.load_corpus(dir.path()).unwrap();
        pipeline.run(&documents, |_| {}).await.unwrap();

        let results = store.search(&[100.0, 1.0], 1).await.unwrap();
        assert_eq!(results[0].chunk.language, Some(Language::Hi));
    }

    #[tokio::test]
    async fn test_missing_folder_is_an_error() {
        let store = MemoryVectorStore::new(2);
        let embedder = HashEmbedder;
        let pipeline =
            IngestPipeline::new(&embedder, &store, 500, 50, Language::En).unwrap();
        assert!(pipeline.load_corpus(Path::new("/nonexistent/corpus")).is_err());
    }
}

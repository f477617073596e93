//! Satsang - Multilingual Spiritual Guidance
//!
//! A question-answering service grounded in Sai Baba's teachings, with
//! answers in English, Hindi, Telugu, and Kannada.
//!
//! The name "Satsang" is the Sanskrit word for a gathering in search of truth.
//!
//! # Overview
//!
//! Satsang allows you to:
//! - Ask questions about the teachings in four languages and get grounded answers
//! - Index a plain-text teaching corpus into a searchable vector database
//! - Run an HTTP API for integration with web and mobile clients
//! - Operate without any LLM provider using curated topic answers
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `language` - Script-based language detection
//! - `safety` - Prohibited-topic filter and response sanitizer
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector database abstraction
//! - `generation` - LLM answer generation (OpenAI, Gemini)
//! - `topics` - Static per-topic fallback answers
//! - `ingest` - Corpus loading, chunking, and indexing
//! - `engine` - The guidance engine tying it all together
//! - `api` - HTTP API server
//!
//! # Example
//!
//! ```rust,no_run
//! use satsang::config::{Prompts, Settings};
//! use satsang::engine::GuidanceEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::default();
//!     let engine = GuidanceEngine::new(&settings, Prompts::default(), None, None, None)?;
//!
//!     let answer = engine.ask("What is devotion?", None).await?;
//!     println!("{}", answer.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ingest;
pub mod language;
pub mod openai;
pub mod safety;
pub mod topics;
pub mod vector_store;

pub use error::{Result, SatsangError};

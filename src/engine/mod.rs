//! The guidance engine: ties language detection, safety, retrieval,
//! generation, and sanitization into a single `ask` operation.
//!
//! A non-empty question always produces an `Answer`. Provider failures
//! degrade to the static topic tables for that request; only an empty
//! question is an error, which the HTTP layer maps to 422.

mod prompt;

pub use prompt::PromptBuilder;

use crate::config::{Prompts, Settings};
use crate::embedding::Embedder;
use crate::error::{Result, SatsangError};
use crate::generation::Generator;
use crate::language::{parse_language_override, Language, LanguageDetector};
use crate::safety::{disclaimer, sanitize, SafetyFilter};
use crate::topics::TopicTable;
use crate::vector_store::VectorStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How the engine answers questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Static topic tables only, no provider configured.
    Simple,
    /// Full retrieval and generation pipeline.
    Llm,
}

/// A complete answer to one question.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub language: Language,
    /// Source documents the answer drew on, deduplicated, in rank order.
    pub sources: Vec<String>,
    pub is_safe: bool,
    pub disclaimer: String,
}

impl Answer {
    fn new(question: &str, answer: String, language: Language, sources: Vec<String>, is_safe: bool) -> Self {
        Self {
            question: question.to_string(),
            answer,
            language,
            sources,
            is_safe,
            disclaimer: disclaimer(language).to_string(),
        }
    }
}

/// Retrieval and generation backends, present only in LLM mode.
struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn Generator>,
}

/// Orchestrates the question-answering flow.
pub struct GuidanceEngine {
    detector: LanguageDetector,
    filter: SafetyFilter,
    prompt_builder: PromptBuilder,
    pipeline: Option<RagPipeline>,
    supported: Vec<Language>,
    default_language: Language,
    top_k: usize,
    min_score: f32,
    timeout: Duration,
}

impl GuidanceEngine {
    /// Build an engine. All three pipeline components must be supplied for
    /// LLM mode; passing `None` for the generator selects simple mode.
    pub fn new(
        settings: &Settings,
        prompts: Prompts,
        embedder: Option<Arc<dyn Embedder>>,
        store: Option<Arc<dyn VectorStore>>,
        generator: Option<Arc<dyn Generator>>,
    ) -> Result<Self> {
        crate::safety::validate_tables()?;
        TopicTable::validate()?;

        let pipeline = match (embedder, store, generator) {
            (Some(embedder), Some(store), Some(generator)) => Some(RagPipeline {
                embedder,
                store,
                generator,
            }),
            (None, None, None) => None,
            _ => {
                return Err(SatsangError::Config(
                    "LLM mode requires an embedder, a vector store, and a generator".to_string(),
                ))
            }
        };

        let mode = if pipeline.is_some() {
            EngineMode::Llm
        } else {
            EngineMode::Simple
        };
        info!(?mode, "Guidance engine initialized");

        Ok(Self {
            detector: LanguageDetector::new(settings.language.default),
            filter: SafetyFilter::new(),
            prompt_builder: PromptBuilder::new(prompts),
            pipeline,
            supported: settings.language.supported.clone(),
            default_language: settings.language.default,
            top_k: settings.retrieval.top_k,
            min_score: settings.retrieval.min_score,
            timeout: Duration::from_secs(settings.provider.timeout_seconds),
        })
    }

    /// Clamp a resolved language to the configured supported set. Detection
    /// and overrides can name any known language; an answer must not.
    fn clamp_language(&self, language: Language) -> Language {
        if self.supported.contains(&language) {
            language
        } else {
            warn!(
                requested = language.code(),
                fallback = self.default_language.code(),
                "Requested language is not in the supported set"
            );
            self.default_language
        }
    }

    pub fn mode(&self) -> EngineMode {
        if self.pipeline.is_some() {
            EngineMode::Llm
        } else {
            EngineMode::Simple
        }
    }

    /// Provider identifier for health reporting.
    pub fn provider_name(&self) -> &'static str {
        match &self.pipeline {
            Some(p) => p.generator.provider(),
            None => "none",
        }
    }

    /// Model name for health reporting.
    pub fn model_name(&self) -> Option<String> {
        self.pipeline.as_ref().map(|p| p.generator.model())
    }

    /// Number of indexed chunks, zero in simple mode.
    pub async fn chunk_count(&self) -> usize {
        match &self.pipeline {
            Some(p) => p.store.chunk_count().await.unwrap_or(0),
            None => 0,
        }
    }

    /// Answer one question. Errs only for an empty or whitespace question.
    #[instrument(skip(self, question))]
    pub async fn ask(&self, question: &str, language_override: Option<Language>) -> Result<Answer> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(SatsangError::InvalidInput(
                "Question must not be empty".to_string(),
            ));
        }

        let (cleaned, inline_override) = parse_language_override(trimmed);
        let language = self.clamp_language(
            language_override
                .or(inline_override)
                .unwrap_or_else(|| self.detector.detect(&cleaned)),
        );
        debug!(language = language.code(), "Resolved question language");

        let verdict = self.filter.classify(&cleaned);
        if let Some(category) = verdict.category {
            warn!(category = category.name(), "Question blocked by safety filter");
            return Ok(Answer::new(
                trimmed,
                category.refusal(language).to_string(),
                language,
                Vec::new(),
                false,
            ));
        }

        let answer = match &self.pipeline {
            None => self.answer_from_topics(trimmed, &cleaned, language),
            Some(pipeline) => match self.answer_with_rag(pipeline, trimmed, &cleaned, language).await {
                Ok(answer) => answer,
                Err(e) => {
                    warn!("Pipeline failed, falling back to topic tables: {}", e);
                    self.answer_from_topics(trimmed, &cleaned, language)
                }
            },
        };

        Ok(answer)
    }

    fn answer_from_topics(&self, question: &str, cleaned: &str, language: Language) -> Answer {
        let text = TopicTable::answer(cleaned, language);
        Answer::new(question, text, language, Vec::new(), true)
    }

    async fn answer_with_rag(
        &self,
        pipeline: &RagPipeline,
        question: &str,
        cleaned: &str,
        language: Language,
    ) -> Result<Answer> {
        let embedding = tokio::time::timeout(self.timeout, pipeline.embedder.embed(cleaned))
            .await
            .map_err(|_| SatsangError::Embedding("Embedding timed out".to_string()))??;

        let results = pipeline
            .store
            .search_with_threshold(&embedding, self.top_k, self.min_score)
            .await?;
        debug!("Retrieved {} passages", results.len());
        if let Some(top) = results.first() {
            debug!(score = top.score, "Top passage: {}", top.chunk.excerpt(80));
        }

        if results.is_empty() {
            return Ok(Answer::new(
                question,
                no_info_response(language).to_string(),
                language,
                Vec::new(),
                true,
            ));
        }

        let prompt = self.prompt_builder.build(cleaned, language, &results);
        let raw = tokio::time::timeout(self.timeout, pipeline.generator.generate(&prompt))
            .await
            .map_err(|_| SatsangError::Generation("Generation timed out".to_string()))??;

        let (text, clean) = sanitize(&raw, language);
        if !clean {
            // A fully replaced answer drew on none of the passages, so it
            // carries no citations.
            warn!("Sanitizer replaced the generated answer");
            return Ok(Answer::new(question, text, language, Vec::new(), true));
        }

        let mut sources = Vec::new();
        for result in &results {
            if !sources.contains(&result.chunk.source) {
                sources.push(result.chunk.source.clone());
            }
        }

        Ok(Answer::new(question, text, language, sources, true))
    }
}

/// Localized response for questions the indexed teachings do not cover.
fn no_info_response(language: Language) -> &'static str {
    match language {
        Language::En => "This guidance is not available in Sai Baba's teachings.",
        Language::Hi => "यह मार्गदर्शन साईं बाबा की शिक्षाओं में उपलब्ध नहीं है।",
        Language::Te => "ఈ మార్గదర్శకత్వం సాయి బాబా బోధలలో అందుబాటులో లేదు.",
        Language::Kn => "ಈ ಮಾರ್ಗದರ್ಶನವು ಸಾಯಿಬಾಬಾ ಅವರ ಬೋಧನೆಗಳಲ್ಲಿ ಲಭ್ಯವಿಲ್ಲ.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::{MemoryVectorStore, TeachingChunk};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockEmbedder {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockEmbedder {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0), fail: false }
        }

        fn failing() -> Self {
            Self { calls: AtomicUsize::new(0), fail: true }
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SatsangError::Embedding("mock failure".to_string()));
            }
            Ok(vec![1.0, 0.0])
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

    struct MockGenerator {
        calls: AtomicUsize,
        reply: String,
        fail: bool,
    }

    impl MockGenerator {
        fn replying(reply: &str) -> Self {
            Self { calls: AtomicUsize::new(0), reply: reply.to_string(), fail: false }
        }

        fn failing() -> Self {
            Self { calls: AtomicUsize::new(0), reply: String::new(), fail: true }
        }
    }

    #[async_trait]
    impl Generator for MockGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SatsangError::Generation("mock failure".to_string()));
            }
            Ok(self.reply.clone())
        }

        fn provider(&self) -> &'static str {
            "mock"
        }

        fn model(&self) -> String {
            "mock-model".to_string()
        }
    }

    async fn seeded_store() -> Arc<MemoryVectorStore> {
        let store = Arc::new(MemoryVectorStore::new(2));
        store
            .rebuild(vec![
                TeachingChunk::new(
                    "Devotion is love in action, offered without expectation.".to_string(),
                    "sathya_vol1.txt".to_string(),
                    Some(12),
                    Some(Language::En),
                    vec![1.0, 0.0],
                    0,
                ),
                TeachingChunk::new(
                    "Seva purifies the heart of the one who serves.".to_string(),
                    "sathya_vol1.txt".to_string(),
                    Some(31),
                    Some(Language::En),
                    vec![0.9, 0.1],
                    1,
                ),
            ])
            .await
            .unwrap();
        store
    }

    fn llm_engine(
        embedder: Arc<MockEmbedder>,
        store: Arc<MemoryVectorStore>,
        generator: Arc<MockGenerator>,
    ) -> GuidanceEngine {
        GuidanceEngine::new(
            &Settings::default(),
            Prompts::default(),
            Some(embedder),
            Some(store),
            Some(generator),
        )
        .unwrap()
    }

    fn simple_engine() -> GuidanceEngine {
        GuidanceEngine::new(&Settings::default(), Prompts::default(), None, None, None).unwrap()
    }

    #[tokio::test]
    async fn test_empty_question_is_invalid_input() {
        let engine = simple_engine();
        assert!(matches!(
            engine.ask("   ", None).await,
            Err(SatsangError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_simple_mode_answers_known_topic() {
        let engine = simple_engine();
        assert_eq!(engine.mode(), EngineMode::Simple);

        let answer = engine.ask("What is devotion?", None).await.unwrap();
        assert!(answer.answer.starts_with("Devotion is the path of love"));
        assert_eq!(answer.language, Language::En);
        assert!(answer.is_safe);
        assert!(answer.sources.is_empty());
        assert!(!answer.disclaimer.is_empty());
    }

    #[tokio::test]
    async fn test_blocked_question_skips_retrieval_and_generation() {
        let embedder = Arc::new(MockEmbedder::new());
        let generator = Arc::new(MockGenerator::replying("unused"));
        let engine = llm_engine(Arc::clone(&embedder), seeded_store().await, Arc::clone(&generator));

        let answer = engine
            .ask("What medicine should I take for my illness?", None)
            .await
            .unwrap();

        assert!(!answer.is_safe);
        assert!(answer.sources.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_llm_mode_answers_with_citations() {
        let generator = Arc::new(MockGenerator::replying(
            "Devotion means offering every act with love, as the teachings describe.",
        ));
        let engine = llm_engine(Arc::new(MockEmbedder::new()), seeded_store().await, generator);
        assert_eq!(engine.mode(), EngineMode::Llm);

        let answer = engine.ask("What is devotion?", None).await.unwrap();
        assert!(answer.answer.starts_with("Devotion means offering"));
        assert!(answer.is_safe);
        // Both chunks share one source file, so citations deduplicate.
        assert_eq!(answer.sources, vec!["sathya_vol1.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back_to_topics() {
        let engine = llm_engine(
            Arc::new(MockEmbedder::new()),
            seeded_store().await,
            Arc::new(MockGenerator::failing()),
        );

        let answer = engine.ask("What is devotion?", None).await.unwrap();
        assert!(answer.answer.starts_with("Devotion is the path of love"));
        assert!(answer.is_safe);
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_embedding_failure_falls_back_to_topics() {
        let generator = Arc::new(MockGenerator::replying("unused"));
        let engine = llm_engine(
            Arc::new(MockEmbedder::failing()),
            seeded_store().await,
            Arc::clone(&generator),
        );

        let answer = engine.ask("Tell me about karma", None).await.unwrap();
        assert!(answer.answer.starts_with("Karma is the law"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_index_reports_no_guidance() {
        let engine = llm_engine(
            Arc::new(MockEmbedder::new()),
            Arc::new(MemoryVectorStore::new(2)),
            Arc::new(MockGenerator::replying("unused")),
        );

        let answer = engine.ask("What is devotion?", None).await.unwrap();
        assert_eq!(
            answer.answer,
            "This guidance is not available in Sai Baba's teachings."
        );
        assert!(answer.sources.is_empty());
    }

    #[tokio::test]
    async fn test_language_override_beats_detection() {
        let engine = simple_engine();
        let answer = engine.ask("What is devotion?", Some(Language::Hi)).await.unwrap();
        assert_eq!(answer.language, Language::Hi);
        assert!(answer.answer.contains("भक्ति"));
    }

    #[tokio::test]
    async fn test_inline_directive_resolves_language() {
        let engine = simple_engine();
        let answer = engine.ask("What is devotion? lang:te", None).await.unwrap();
        assert_eq!(answer.language, Language::Te);
    }

    #[tokio::test]
    async fn test_detected_hindi_question() {
        let engine = simple_engine();
        let answer = engine.ask("भक्ति क्या है और इसका महत्व क्या है?", None).await.unwrap();
        assert_eq!(answer.language, Language::Hi);
    }

    #[tokio::test]
    async fn test_unsupported_language_degrades_to_default() {
        let mut settings = Settings::default();
        settings.language.supported = vec![Language::En];
        let engine =
            GuidanceEngine::new(&settings, Prompts::default(), None, None, None).unwrap();

        // Detected Telugu degrades to the configured default.
        let answer = engine
            .ask("భక్తి అంటే ఏమిటి మరియు దాని ప్రాముఖ్యత ఏమిటి?", None)
            .await
            .unwrap();
        assert_eq!(answer.language, Language::En);

        // So does an explicit override naming an unsupported language.
        let answer = engine
            .ask("What is devotion?", Some(Language::Kn))
            .await
            .unwrap();
        assert_eq!(answer.language, Language::En);
    }

    #[tokio::test]
    async fn test_fully_sanitized_answer_carries_no_citations() {
        let generator = Arc::new(MockGenerator::replying("I am Sai Baba. Worship me!"));
        let engine = llm_engine(Arc::new(MockEmbedder::new()), seeded_store().await, generator);

        let answer = engine.ask("What is devotion?", None).await.unwrap();
        assert!(answer.answer.contains("rephrase your question"));
        assert!(answer.sources.is_empty());
        assert!(answer.is_safe);
    }

    #[tokio::test]
    async fn test_divine_claim_sanitized() {
        let generator = Arc::new(MockGenerator::replying(
            "I am God and you must worship me. Devotion brings peace to the devotee.",
        ));
        let engine = llm_engine(Arc::new(MockEmbedder::new()), seeded_store().await, generator);

        let answer = engine.ask("What is devotion?", None).await.unwrap();
        assert!(!answer.answer.contains("I am God"));
        assert!(answer.answer.contains("Devotion brings peace"));
    }

    #[test]
    fn test_partial_pipeline_is_rejected() {
        let result = GuidanceEngine::new(
            &Settings::default(),
            Prompts::default(),
            Some(Arc::new(MockEmbedder::new())),
            None,
            Some(Arc::new(MockGenerator::replying("x"))),
        );
        match result {
            Err(SatsangError::Config(msg)) => assert!(msg.contains("LLM mode")),
            _ => panic!("expected a configuration error"),
        }
    }
}

//! Renders retrieved passages and the question into the guidance prompt.

use crate::config::Prompts;
use crate::language::Language;
use crate::vector_store::SearchResult;
use std::collections::HashMap;

/// Builds the grounded guidance prompt from configured templates.
pub struct PromptBuilder {
    prompts: Prompts,
}

impl PromptBuilder {
    pub fn new(prompts: Prompts) -> Self {
        Self { prompts }
    }

    /// Render the full prompt for one question. Passages are concatenated in
    /// rank order; an empty result set substitutes the no-context notice so
    /// the model declines instead of inventing an answer.
    pub fn build(&self, question: &str, language: Language, results: &[SearchResult]) -> String {
        let context = if results.is_empty() {
            self.prompts.guidance.empty_context.clone()
        } else {
            results
                .iter()
                .map(|r| r.chunk.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n")
        };

        let mut vars = HashMap::new();
        vars.insert(
            "language_instruction".to_string(),
            language.response_directive().to_string(),
        );
        vars.insert("context".to_string(), context);
        vars.insert("question".to_string(), question.to_string());

        Prompts::render(&self.prompts.guidance.user, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::TeachingChunk;

    fn result(text: &str) -> SearchResult {
        SearchResult {
            chunk: TeachingChunk::new(
                text.to_string(),
                "sathya.txt".to_string(),
                None,
                None,
                vec![1.0],
                0,
            ),
            score: 0.9,
        }
    }

    #[test]
    fn test_prompt_contains_passages_in_rank_order() {
        let builder = PromptBuilder::new(Prompts::default());
        let prompt = builder.build(
            "What is devotion?",
            Language::En,
            &[result("First passage."), result("Second passage.")],
        );

        assert!(prompt.contains("What is devotion?"));
        let first = prompt.find("First passage.").unwrap();
        let second = prompt.find("Second passage.").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_prompt_carries_language_directive() {
        let builder = PromptBuilder::new(Prompts::default());
        let prompt = builder.build("भक्ति क्या है?", Language::Hi, &[result("भक्ति।")]);
        assert!(prompt.contains(Language::Hi.response_directive()));
    }

    #[test]
    fn test_empty_results_use_no_context_notice() {
        let builder = PromptBuilder::new(Prompts::default());
        let prompt = builder.build("What is devotion?", Language::En, &[]);
        assert!(prompt.contains("No matching passages"));
    }
}

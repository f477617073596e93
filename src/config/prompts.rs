//! Prompt templates for grounded answer generation.
//!
//! Templates can be customized by placing TOML files in the config
//! directory; the defaults bake in the safety rules the sanitizer expects
//! the generator to follow.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub guidance: GuidancePrompts,
}

/// Prompts for the grounded guidance answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidancePrompts {
    /// Main template. Variables: language_instruction, context, question.
    pub user: String,
    /// Substituted for {{context}} when retrieval found nothing.
    pub empty_context: String,
}

impl Default for GuidancePrompts {
    fn default() -> Self {
        Self {
            user: r#"You are a humble spiritual guide sharing wisdom from Sai Baba's teachings.

CRITICAL SAFETY RULES:
1. NEVER claim to be God, divine, or Sai Baba himself
2. NEVER provide medical, legal, or predictive advice
3. If the question is outside the teachings, respond: "This guidance is not available in Sai Baba's teachings."
4. Maintain a peaceful, devotional, and humble tone
5. Base answers ONLY on the provided context

LANGUAGE INSTRUCTION:
{{language_instruction}}

Context from Sai Baba's teachings (may be in multiple languages):
{{context}}

Question: {{question}}

Provide a thoughtful answer based solely on the teachings found in the context above. If the context doesn't contain relevant information, acknowledge this limitation.

Answer:"#
                .to_string(),

            empty_context: "No matching passages were found for this question. State \
                            clearly that no matching teaching is available; do not guess \
                            or invent an answer."
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying overrides from `guidance.toml` in the custom
    /// directory if present.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());
            let guidance_path = custom_path.join("guidance.toml");
            if guidance_path.exists() {
                let content = std::fs::read_to_string(&guidance_path)?;
                prompts.guidance = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}

//! Language codes and detection for multilingual questions.
//!
//! Satsang supports English, Hindi, Telugu and Kannada. The three Indic
//! languages occupy disjoint Unicode blocks, so detection is a matter of
//! counting script letters rather than statistical modeling.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A supported language, identified by its ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
    Kn,
}

impl Language {
    /// All supported languages, in detection tie-break order (Indic first).
    pub const ALL: [Language; 4] = [Language::Hi, Language::Te, Language::Kn, Language::En];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
            Language::Kn => "kn",
        }
    }

    /// Human-readable name, with the native spelling for Indic scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi (हिंदी)",
            Language::Te => "Telugu (తెలుగు)",
            Language::Kn => "Kannada (ಕನ್ನಡ)",
        }
    }

    /// Instruction line telling the generator which language to answer in.
    pub fn response_directive(&self) -> &'static str {
        match self {
            Language::En => "Respond in English.",
            Language::Hi => "हिंदी में उत्तर दें। (Respond in Hindi.)",
            Language::Te => "తెలుగులో ప్రతిస్పందించండి। (Respond in Telugu.)",
            Language::Kn => "ಕನ್ನಡದಲ್ಲಿ ಪ್ರತಿಕ್ರಿಯಿಸಿ। (Respond in Kannada.)",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            "te" | "telugu" => Ok(Language::Te),
            "kn" | "kannada" => Ok(Language::Kn),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Minimum script letters needed before detection trusts its own counts.
const MIN_SCRIPT_CHARS: usize = 10;

/// Script-statistics language detector.
///
/// Counts letters per Unicode block and picks the dominant script. Inputs
/// shorter than [`MIN_SCRIPT_CHARS`] letters, or without a dominant script,
/// fall back to the configured default. Never fails on valid UTF-8.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    default: Language,
}

impl LanguageDetector {
    pub fn new(default: Language) -> Self {
        Self { default }
    }

    /// Detect the language of `text`, falling back to the default.
    pub fn detect(&self, text: &str) -> Language {
        let mut counts = [0usize; 4]; // indexed by Language::ALL order
        for c in text.chars() {
            match c as u32 {
                0x0900..=0x097F => counts[0] += 1, // Devanagari
                0x0C00..=0x0C7F => counts[1] += 1, // Telugu
                0x0C80..=0x0CFF => counts[2] += 1, // Kannada
                _ if c.is_ascii_alphabetic() => counts[3] += 1,
                _ => {}
            }
        }

        let total: usize = counts.iter().sum();
        if total < MIN_SCRIPT_CHARS {
            return self.default;
        }

        // First maximum wins, so ties resolve in ALL order (hi, te, kn, en).
        let mut best = 0;
        for i in 1..counts.len() {
            if counts[i] > counts[best] {
                best = i;
            }
        }
        if counts[best] == 0 {
            return self.default;
        }
        Language::ALL[best]
    }
}

fn lang_tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\blang\s*[:=]\s*(en|hi|te|kn)\b").expect("static pattern")
    })
}

fn lang_phrase_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bin\s+(english|hindi|telugu|kannada)\b").expect("static pattern")
    })
}

/// Extract an inline language directive from a question.
///
/// Recognizes `lang:hi` / `lang=hi` tags and natural phrases like
/// "in Hindi". Returns the question with the directive stripped, plus the
/// requested language if one was found.
pub fn parse_language_override(question: &str) -> (String, Option<Language>) {
    if let Some(caps) = lang_tag_pattern().captures(question) {
        let lang = caps[1].parse().ok();
        let stripped = lang_tag_pattern().replace(question, "").trim().to_string();
        return (stripped, lang);
    }

    if let Some(caps) = lang_phrase_pattern().captures(question) {
        let lang = caps[1].parse().ok();
        let stripped = lang_phrase_pattern().replace(question, "").trim().to_string();
        return (stripped, lang);
    }

    (question.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_supported_language() {
        let detector = LanguageDetector::new(Language::En);

        let samples = [
            ("What is the importance of faith in daily life?", Language::En),
            ("भक्ति क्या है और इसका महत्व क्या है?", Language::Hi),
            ("భక్తి అంటే ఏమిటి మరియు దాని ప్రాముఖ్యత ఏమిటి?", Language::Te),
            ("ಭಕ್ತಿ ಎಂದರೇನು ಮತ್ತು ಅದರ ಮಹತ್ವವೇನು?", Language::Kn),
        ];

        for (text, expected) in samples {
            assert_eq!(detector.detect(text), expected, "text: {}", text);
        }
    }

    #[test]
    fn test_short_or_empty_input_falls_back_to_default() {
        let detector = LanguageDetector::new(Language::En);
        assert_eq!(detector.detect(""), Language::En);
        assert_eq!(detector.detect("ॐ"), Language::En);
        assert_eq!(detector.detect("hi"), Language::En);

        let detector_hi = LanguageDetector::new(Language::Hi);
        assert_eq!(detector_hi.detect("??"), Language::Hi);
    }

    #[test]
    fn test_dominant_script_wins_in_mixed_text() {
        let detector = LanguageDetector::new(Language::En);
        // Mostly Devanagari with a Latin word mixed in.
        assert_eq!(
            detector.detect("भक्ति का अर्थ क्या है bhakti?"),
            Language::Hi
        );
    }

    #[test]
    fn test_parse_lang_tag_override() {
        let (q, lang) = parse_language_override("What is devotion? lang:hi");
        assert_eq!(lang, Some(Language::Hi));
        assert_eq!(q, "What is devotion?");
    }

    #[test]
    fn test_parse_phrase_override() {
        let (q, lang) = parse_language_override("Answer in Telugu please: what is karma?");
        assert_eq!(lang, Some(Language::Te));
        assert!(!q.to_lowercase().contains("in telugu"));
    }

    #[test]
    fn test_no_override_leaves_question_intact() {
        let (q, lang) = parse_language_override("  What is truth?  ");
        assert_eq!(lang, None);
        assert_eq!(q, "What is truth?");
    }

    #[test]
    fn test_language_parse_and_display() {
        let lang: Language = "kannada".parse().unwrap();
        assert_eq!(lang, Language::Kn);
        assert_eq!(lang.to_string(), "kn");
        assert!("xx".parse::<Language>().is_err());
    }
}

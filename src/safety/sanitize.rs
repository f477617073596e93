//! Response sanitization.
//!
//! Generated answers must never assert first-person divine identity. The
//! sanitizer drops offending sentences wholesale and substitutes a fixed
//! refusal if nothing survives.

use crate::language::Language;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Answers shorter than this get the study-the-sources note appended.
const SHORT_ANSWER_CHARS: usize = 50;

fn divine_claim_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)\bi\s+am\s+(god|divine|sai\s*baba|baba|omnipotent|omniscient|all[-\s]knowing)\b",
            r"(?i)\bworship\s+me\b",
            // Hindi: "मैं भगवान/ईश्वर/साईं बाबा हूँ"
            r"मैं\s+(भगवान|ईश्वर|साईं\s*बाबा)\s+हूँ?",
            // Telugu: "నేను దేవుడిని / సాయి బాబాను"
            r"నేను\s+(దేవుడిని|దేవుడను|సాయి\s*బాబాను)",
            // Kannada: "ನಾನು ದೇವರು / ಸಾಯಿಬಾಬಾ"
            r"ನಾನು\s+(ದೇವರು|ಸಾಯಿ\s*ಬಾಬಾ)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern"))
        .collect()
    })
}

/// Safe replacement answer when sanitization removes everything.
fn safe_default(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "I can only share humble guidance drawn from Sai Baba's teachings. \
             Please rephrase your question."
        }
        Language::Hi => {
            "मैं केवल साईं बाबा की शिक्षाओं से विनम्र मार्गदर्शन साझा कर सकता हूँ। कृपया अपना \
             प्रश्न दोबारा लिखें।"
        }
        Language::Te => {
            "నేను సాయి బాబా బోధనల నుండి వినయపూర్వక మార్గదర్శకత్వాన్ని మాత్రమే పంచుకోగలను. \
             దయచేసి మీ ప్రశ్నను తిరిగి వ్రాయండి."
        }
        Language::Kn => {
            "ನಾನು ಸಾಯಿಬಾಬಾ ಅವರ ಬೋಧನೆಗಳಿಂದ ವಿನಮ್ರ ಮಾರ್ಗದರ್ಶನವನ್ನು ಮಾತ್ರ ಹಂಚಿಕೊಳ್ಳಬಲ್ಲೆ. \
             ದಯವಿಟ್ಟು ನಿಮ್ಮ ಪ್ರಶ್ನೆಯನ್ನು ಪುನಃ ಬರೆಯಿರಿ."
        }
    }
}

/// Note appended to very short or self-professed-uncertain answers.
fn guidance_note(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "\n\nNote: This guidance is based on the available teachings. For deeper \
             understanding, consider studying the original works."
        }
        Language::Hi => {
            "\n\nनोट: यह मार्गदर्शन उपलब्ध शिक्षाओं पर आधारित है। गहरी समझ के लिए मूल ग्रंथों \
             का अध्ययन करें।"
        }
        Language::Te => {
            "\n\nగమనిక: ఈ మార్గదర్శకత్వం అందుబాటులో ఉన్న బోధనలపై ఆధారపడి ఉంది. లోతైన \
             అవగాహన కోసం మూల గ్రంథాలను అధ్యయనం చేయండి."
        }
        Language::Kn => {
            "\n\nಸೂಚನೆ: ಈ ಮಾರ್ಗದರ್ಶನವು ಲಭ್ಯವಿರುವ ಬೋಧನೆಗಳ ಮೇಲೆ ಆಧಾರಿತವಾಗಿದೆ. ಆಳವಾದ \
             ತಿಳುವಳಿಕೆಗಾಗಿ ಮೂಲ ಕೃತಿಗಳನ್ನು ಅಧ್ಯಯನ ಮಾಡಿ."
        }
    }
}

/// Split into sentences, keeping terminators. Handles the danda (।/॥) used
/// by Indic scripts alongside Latin punctuation.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?' | '।' | '॥') {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.trim().is_empty() {
        sentences.push(current);
    }
    sentences
}

/// Strip sentences asserting first-person divine identity, then append the
/// short-answer note where warranted. Returns the cleaned text and whether
/// the result is still considered safe (false only when everything had to
/// be replaced by the default refusal).
pub fn sanitize(raw: &str, lang: Language) -> (String, bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (safe_default(lang).to_string(), false);
    }

    let patterns = divine_claim_patterns();
    let kept: Vec<String> = split_sentences(trimmed)
        .into_iter()
        .filter(|sentence| {
            let offending = patterns.iter().any(|p| p.is_match(sentence));
            if offending {
                warn!("Removed divine-identity claim from generated answer");
            }
            !offending
        })
        .collect();

    let mut cleaned = kept.join("").trim().to_string();
    if cleaned.is_empty() {
        return (safe_default(lang).to_string(), false);
    }

    let uncertain = cleaned.to_lowercase().contains("i don't know");
    if cleaned.chars().count() < SHORT_ANSWER_CHARS || uncertain {
        cleaned.push_str(guidance_note(lang));
    }

    (cleaned, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_answer_passes_through() {
        let text = "Devotion is the path of love and surrender to the divine. \
                    It purifies the heart and steadies the mind on its journey.";
        let (out, safe) = sanitize(text, Language::En);
        assert!(safe);
        assert_eq!(out, text);
    }

    #[test]
    fn test_divine_claim_sentence_removed() {
        let text = "I am God and you must listen. Devotion is the path of love \
                    and surrender, practiced daily with a humble heart.";
        let (out, safe) = sanitize(text, Language::En);
        assert!(safe);
        assert!(!out.to_lowercase().contains("i am god"));
        assert!(out.contains("Devotion is the path of love"));
    }

    #[test]
    fn test_hindi_divine_claim_removed() {
        let text = "मैं भगवान हूँ। भक्ति प्रेम और समर्पण का मार्ग है, जो हृदय को शुद्ध करता है।";
        let (out, safe) = sanitize(text, Language::Hi);
        assert!(safe);
        assert!(!out.contains("मैं भगवान हूँ"));
        assert!(out.contains("भक्ति"));
    }

    #[test]
    fn test_all_content_removed_yields_default_refusal() {
        let (out, safe) = sanitize("I am Sai Baba. Worship me!", Language::En);
        assert!(!safe);
        assert_eq!(out, safe_default(Language::En));
    }

    #[test]
    fn test_empty_input_yields_default_refusal() {
        let (out, safe) = sanitize("   ", Language::En);
        assert!(!safe);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_short_answer_gets_note() {
        let (out, safe) = sanitize("Faith moves mountains.", Language::En);
        assert!(safe);
        assert!(out.contains("Note:"));
    }
}

//! Safety and ethical guardrails.
//!
//! Questions are screened against prohibited-topic keyword tables before any
//! retrieval or generation work happens, and generated answers are sanitized
//! before they leave the engine. Everything here is pure string matching so
//! it can run on every request.

mod sanitize;

pub use sanitize::sanitize;

use crate::error::{Result, SatsangError};
use crate::language::Language;
use serde::Serialize;

/// A prohibited-topic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyCategory {
    Medical,
    Legal,
    Predictive,
    Harmful,
}

impl SafetyCategory {
    /// Match order. The first category whose keywords match wins, so a
    /// question touching several categories always classifies the same way.
    pub const PRIORITY: [SafetyCategory; 4] = [
        SafetyCategory::Medical,
        SafetyCategory::Legal,
        SafetyCategory::Predictive,
        SafetyCategory::Harmful,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SafetyCategory::Medical => "medical",
            SafetyCategory::Legal => "legal",
            SafetyCategory::Predictive => "predictive",
            SafetyCategory::Harmful => "harmful",
        }
    }

    /// Trigger keywords, matched case-insensitively by containment.
    /// English keywords apply to every question; native-script keywords
    /// cover questions written in the Indic languages.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            SafetyCategory::Medical => &[
                "disease", "cure", "medicine", "treatment", "diagnosis", "diagnose",
                "symptom", "cancer", "diabetes", "covid", "illness", "drug",
                "prescription", "surgery", "therapy", "medical", "health problem",
                "इलाज", "दवा", "बीमारी", "रोग का",
                "మందు", "వ్యాధి", "చికిత్స",
                "ಔಷಧಿ", "ರೋಗ", "ಚಿಕಿತ್ಸೆ",
            ],
            SafetyCategory::Legal => &[
                "lawsuit", "legal advice", "court", "lawyer", "attorney",
                "contract", "divorce", "custody", "testament", "illegal", "criminal",
                "वकील", "अदालत", "कानूनी",
                "న్యాయవాది", "కోర్టు", "చట్టపరమైన",
                "ವಕೀಲ", "ನ್ಯಾಯಾಲಯ", "ಕಾನೂನು",
            ],
            SafetyCategory::Predictive => &[
                "predict", "future", "will happen", "fortune", "lottery", "winning",
                "stock market", "investment", "when will", "prediction", "foretell",
                "भविष्यवाणी", "लॉटरी",
                "జోస్యం", "లాటరీ",
                "ಭವಿಷ್ಯವಾಣಿ", "ಲಾಟರಿ",
            ],
            SafetyCategory::Harmful => &[
                "suicide", "kill myself", "harm myself", "hurt myself", "self-harm",
                "revenge", "weapon", "violence", "hurt someone",
                "आत्महत्या", "बदला",
                "ఆత్మహత్య", "ప్రతీకారం",
                "ಆತ್ಮಹತ್ಯೆ", "ಸೇಡು",
            ],
        }
    }

    /// Fixed refusal text for this category in the given language.
    pub fn refusal(&self, lang: Language) -> &'static str {
        match (self, lang) {
            (SafetyCategory::Medical, Language::En) => {
                "I cannot provide medical advice. For health concerns, please consult \
                 qualified healthcare professionals. I can only share general spiritual \
                 wisdom from Sai Baba's teachings."
            }
            (SafetyCategory::Medical, Language::Hi) => {
                "मैं चिकित्सा सलाह नहीं दे सकता। स्वास्थ्य संबंधी चिंताओं के लिए कृपया योग्य \
                 चिकित्सकों से परामर्श करें। मैं केवल साईं बाबा की शिक्षाओं से सामान्य आध्यात्मिक \
                 ज्ञान साझा कर सकता हूँ।"
            }
            (SafetyCategory::Medical, Language::Te) => {
                "నేను వైద్య సలహా ఇవ్వలేను. ఆరోగ్య విషయాల కోసం దయచేసి అర్హత కలిగిన వైద్యులను \
                 సంప్రదించండి. నేను సాయి బాబా బోధనల నుండి సాధారణ ఆధ్యాత్మిక జ్ఞానాన్ని మాత్రమే \
                 పంచుకోగలను."
            }
            (SafetyCategory::Medical, Language::Kn) => {
                "ನಾನು ವೈದ್ಯಕೀಯ ಸಲಹೆ ನೀಡಲಾರೆ. ಆರೋಗ್ಯ ವಿಷಯಗಳಿಗೆ ದಯವಿಟ್ಟು ಅರ್ಹ ವೈದ್ಯರನ್ನು \
                 ಸಂಪರ್ಕಿಸಿ. ನಾನು ಸಾಯಿಬಾಬಾ ಅವರ ಬೋಧನೆಗಳಿಂದ ಸಾಮಾನ್ಯ ಆಧ್ಯಾತ್ಮಿಕ ಜ್ಞಾನವನ್ನು ಮಾತ್ರ \
                 ಹಂಚಿಕೊಳ್ಳಬಲ್ಲೆ."
            }
            (SafetyCategory::Legal, Language::En) => {
                "I cannot provide legal advice. For legal matters, please consult \
                 qualified legal professionals. I can only share spiritual guidance \
                 from Sai Baba's teachings."
            }
            (SafetyCategory::Legal, Language::Hi) => {
                "मैं कानूनी सलाह नहीं दे सकता। कानूनी मामलों के लिए कृपया योग्य कानूनी \
                 विशेषज्ञों से परामर्श करें। मैं केवल साईं बाबा की शिक्षाओं से आध्यात्मिक \
                 मार्गदर्शन साझा कर सकता हूँ।"
            }
            (SafetyCategory::Legal, Language::Te) => {
                "నేను న్యాయ సలహా ఇవ్వలేను. న్యాయ విషయాల కోసం దయచేసి అర్హత కలిగిన న్యాయ \
                 నిపుణులను సంప్రదించండి. నేను సాయి బాబా బోధనల నుండి ఆధ్యాత్మిక మార్గదర్శకత్వాన్ని \
                 మాత్రమే పంచుకోగలను."
            }
            (SafetyCategory::Legal, Language::Kn) => {
                "ನಾನು ಕಾನೂನು ಸಲಹೆ ನೀಡಲಾರೆ. ಕಾನೂನು ವಿಷಯಗಳಿಗೆ ದಯವಿಟ್ಟು ಅರ್ಹ ಕಾನೂನು \
                 ತಜ್ಞರನ್ನು ಸಂಪರ್ಕಿಸಿ. ನಾನು ಸಾಯಿಬಾಬಾ ಅವರ ಬೋಧನೆಗಳಿಂದ ಆಧ್ಯಾತ್ಮಿಕ ಮಾರ್ಗದರ್ಶನವನ್ನು \
                 ಮಾತ್ರ ಹಂಚಿಕೊಳ್ಳಬಲ್ಲೆ."
            }
            (SafetyCategory::Predictive, Language::En) => {
                "I cannot predict the future or provide fortune-telling. I can only \
                 share timeless spiritual wisdom from Sai Baba's teachings to help \
                 guide your present journey."
            }
            (SafetyCategory::Predictive, Language::Hi) => {
                "मैं भविष्य की भविष्यवाणी नहीं कर सकता। मैं केवल आपके वर्तमान मार्ग के लिए \
                 साईं बाबा की शिक्षाओं से कालातीत आध्यात्मिक ज्ञान साझा कर सकता हूँ।"
            }
            (SafetyCategory::Predictive, Language::Te) => {
                "నేను భవిష్యత్తును చెప్పలేను. మీ ప్రస్తుత ప్రయాణానికి మార్గనిర్దేశం చేసేందుకు సాయి \
                 బాబా బోధనల నుండి కాలాతీత ఆధ్యాత్మిక జ్ఞానాన్ని మాత్రమే పంచుకోగలను."
            }
            (SafetyCategory::Predictive, Language::Kn) => {
                "ನಾನು ಭವಿಷ್ಯವನ್ನು ಹೇಳಲಾರೆ. ನಿಮ್ಮ ಪ್ರಸ್ತುತ ಪ್ರಯಾಣಕ್ಕೆ ಮಾರ್ಗದರ್ಶನ ನೀಡಲು ಸಾಯಿಬಾಬಾ \
                 ಅವರ ಬೋಧನೆಗಳಿಂದ ಕಾಲಾತೀತ ಆಧ್ಯಾತ್ಮಿಕ ಜ್ಞಾನವನ್ನು ಮಾತ್ರ ಹಂಚಿಕೊಳ್ಳಬಲ್ಲೆ."
            }
            (SafetyCategory::Harmful, Language::En) => {
                "I cannot help with anything that could cause harm to you or others. \
                 If you are in distress, please reach out to people you trust or to \
                 professional support services. The teachings counsel compassion \
                 toward yourself and all beings."
            }
            (SafetyCategory::Harmful, Language::Hi) => {
                "मैं किसी भी ऐसी बात में सहायता नहीं कर सकता जिससे आपको या दूसरों को हानि \
                 पहुँचे। यदि आप संकट में हैं, तो कृपया विश्वसनीय लोगों या पेशेवर सहायता सेवाओं से \
                 संपर्क करें।"
            }
            (SafetyCategory::Harmful, Language::Te) => {
                "మీకు లేదా ఇతరులకు హాని కలిగించే విషయాలలో నేను సహాయం చేయలేను. మీరు ఇబ్బందిలో \
                 ఉంటే, దయచేసి మీరు నమ్మే వ్యక్తులను లేదా వృత్తిపరమైన సహాయ సేవలను సంప్రదించండి."
            }
            (SafetyCategory::Harmful, Language::Kn) => {
                "ನಿಮಗೆ ಅಥವಾ ಇತರರಿಗೆ ಹಾನಿ ಉಂಟುಮಾಡುವ ವಿಷಯಗಳಲ್ಲಿ ನಾನು ಸಹಾಯ ಮಾಡಲಾರೆ. ನೀವು \
                 ಸಂಕಷ್ಟದಲ್ಲಿದ್ದರೆ, ದಯವಿಟ್ಟು ನೀವು ನಂಬುವ ವ್ಯಕ್ತಿಗಳನ್ನು ಅಥವಾ ವೃತ್ತಿಪರ ನೆರವಿನ ಸೇವೆಗಳನ್ನು \
                 ಸಂಪರ್ಕಿಸಿ."
            }
        }
    }
}

/// Result of screening a question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    pub category: Option<SafetyCategory>,
}

impl SafetyVerdict {
    pub fn safe() -> Self {
        Self { is_safe: true, category: None }
    }

    pub fn blocked(category: SafetyCategory) -> Self {
        Self { is_safe: false, category: Some(category) }
    }
}

/// Keyword-based prohibited-topic filter.
#[derive(Debug, Clone, Default)]
pub struct SafetyFilter;

impl SafetyFilter {
    pub fn new() -> Self {
        Self
    }

    /// Classify a question. Categories are checked in [`SafetyCategory::PRIORITY`]
    /// order; the first match wins.
    pub fn classify(&self, question: &str) -> SafetyVerdict {
        let lowered = question.to_lowercase();
        for category in SafetyCategory::PRIORITY {
            if category.keywords().iter().any(|kw| lowered.contains(kw)) {
                return SafetyVerdict::blocked(category);
            }
        }
        SafetyVerdict::safe()
    }
}

/// Fixed per-language disclaimer attached to every answer.
pub fn disclaimer(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "This guidance is based on Sai Baba's teachings available in our \
             database. For personal spiritual matters, consider seeking guidance \
             from qualified spiritual teachers. This is not medical, legal, or \
             predictive advice."
        }
        Language::Hi => {
            "यह मार्गदर्शन हमारे डेटाबेस में उपलब्ध साईं बाबा की शिक्षाओं पर आधारित है। \
             व्यक्तिगत आध्यात्मिक मामलों के लिए योग्य आध्यात्मिक शिक्षकों से मार्गदर्शन लेने पर \
             विचार करें। यह चिकित्सा, कानूनी या भविष्यवाणी संबंधी सलाह नहीं है।"
        }
        Language::Te => {
            "ఈ మార్గదర్శకత్వం మా డేటాబేస్‌లో అందుబాటులో ఉన్న సాయి బాబా బోధనలపై ఆధారపడి \
             ఉంది. వ్యక్తిగత ఆధ్యాత్మిక విషయాల కోసం, అర్హత కలిగిన ఆధ్యాత్మిక గురువుల నుండి \
             మార్గదర్శకత్వం పొందండి. ఇది వైద్య, న్యాయ లేదా భవిష్యత్ సలహా కాదు."
        }
        Language::Kn => {
            "ಈ ಮಾರ್ಗದರ್ಶನವು ನಮ್ಮ ಡೇಟಾಬೇಸ್‌ನಲ್ಲಿ ಲಭ್ಯವಿರುವ ಸಾಯಿಬಾಬಾ ಅವರ ಬೋಧನೆಗಳ ಮೇಲೆ \
             ಆಧಾರಿತವಾಗಿದೆ. ವೈಯಕ್ತಿಕ ಆಧ್ಯಾತ್ಮಿಕ ವಿಷಯಗಳಿಗಾಗಿ, ಅರ್ಹ ಆಧ್ಯಾತ್ಮಿಕ ಗುರುಗಳಿಂದ \
             ಮಾರ್ಗದರ್ಶನವನ್ನು ಪಡೆಯುವುದನ್ನು ಪರಿಗಣಿಸಿ. ಇದು ವೈದ್ಯಕೀಯ, ಕಾನೂನು ಅಥವಾ ಭವಿಷ್ಯ \
             ಸಲಹೆ ಅಲ್ಲ."
        }
    }
}

/// Startup invariant check: every category has keywords and a refusal in
/// every supported language.
pub fn validate_tables() -> Result<()> {
    for category in SafetyCategory::PRIORITY {
        if category.keywords().is_empty() {
            return Err(SatsangError::Config(format!(
                "Safety category '{}' has no trigger keywords",
                category.name()
            )));
        }
        for lang in Language::ALL {
            if category.refusal(lang).trim().is_empty() {
                return Err(SatsangError::Config(format!(
                    "Safety category '{}' has no refusal for language '{}'",
                    category.name(),
                    lang
                )));
            }
        }
    }
    for lang in Language::ALL {
        if disclaimer(lang).trim().is_empty() {
            return Err(SatsangError::Config(format!(
                "Missing disclaimer for language '{}'",
                lang
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_question_passes() {
        let filter = SafetyFilter::new();
        let verdict = filter.classify("What is devotion?");
        assert!(verdict.is_safe);
        assert_eq!(verdict.category, None);
    }

    #[test]
    fn test_medical_question_blocked() {
        let filter = SafetyFilter::new();
        let verdict = filter.classify("Can you diagnose my symptoms?");
        assert!(!verdict.is_safe);
        assert_eq!(verdict.category, Some(SafetyCategory::Medical));
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let filter = SafetyFilter::new();
        let verdict = filter.classify("Should I file a LAWSUIT against my neighbor?");
        assert_eq!(verdict.category, Some(SafetyCategory::Legal));
    }

    #[test]
    fn test_multi_category_match_uses_priority_order() {
        let filter = SafetyFilter::new();
        // Matches both medical ("medicine") and predictive ("future");
        // medical has higher priority.
        let verdict = filter.classify("Will this medicine work in the future?");
        assert_eq!(verdict.category, Some(SafetyCategory::Medical));
    }

    #[test]
    fn test_native_script_keywords_match() {
        let filter = SafetyFilter::new();
        let verdict = filter.classify("मेरी बीमारी का इलाज क्या है?");
        assert_eq!(verdict.category, Some(SafetyCategory::Medical));
    }

    #[test]
    fn test_refusal_tables_are_total() {
        validate_tables().unwrap();
        for category in SafetyCategory::PRIORITY {
            for lang in Language::ALL {
                assert!(!category.refusal(lang).is_empty());
            }
        }
    }
}

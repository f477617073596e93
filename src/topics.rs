//! Static topic answers for running without an LLM provider.
//!
//! Keyword-matched guidance in all four supported languages. This is both
//! the whole engine in simple mode and the fallback when a configured
//! provider fails at request time.

use crate::language::Language;

/// Keyword-matched static answer tables.
pub struct TopicTable;

/// One topic with its English match keyword, native-script keywords, and
/// per-language answers.
struct Topic {
    keyword: &'static str,
    native_keywords: &'static [&'static str],
    en: &'static str,
    hi: &'static str,
    te: &'static str,
    kn: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        keyword: "devotion",
        native_keywords: &["भक्ति", "భక్తి", "ಭಕ್ತಿ"],
        en: "Devotion is the path of love and surrender to the divine. Through devotion, one develops a loving relationship with God, seeking to serve and please the divine with all one's heart.",
        hi: "भक्ति प्रेम और आत्मसमर्पण का मार्ग है। भक्ति के माध्यम से, व्यक्ति ईश्वर के साथ एक प्रेमपूर्ण संबंध विकसित करता है, और सभी कार्यों में ईश्वर को प्रसन्न करने का प्रयास करता है।",
        te: "భక్తి అనేది ప్రేమ మరియు దివ్యానికి సమర్పణ యొక్క మార్గం. భక్తి ద్వారా, ఒక వ్యక్తి దేవతకు ప్రేమతో సంబంధం కలిగి, దేవతను సంతృప్తపరచటానికి ప్రయత్నిస్తాడు.",
        kn: "ಭಕ್ತಿ ಪ್ರೀತಿ ಮತ್ತು ದೈವಕ್ಕೆ ಸಮರ್ಪಣೆಯ ಮಾರ್ಗ. ಭಕ್ತಿಯ ಮೂಲಕ, ಒಬ್ಬ ವ್ಯಕ್ತಿ ದೇವರೊಂದಿಗೆ ಪ್ರೀತಿಯುತ ಸಂಬಂಧವನ್ನು ಅಭಿವೃದ್ಧಿಪಡಿಸಿಕೊಳ್ಳುತ್ತಾನೆ, ದೇವರನ್ನು ಸಂತುಷ್ಟಪಡಿಸಲು ಪ್ರಯತ್ನಿಸುತ್ತಾನೆ.",
    },
    Topic {
        keyword: "faith",
        native_keywords: &["विश्वास", "విశ్వాసం", "ವಿಶ್ವಾಸ"],
        en: "Faith is trust in God and the teachings. With faith, even the impossible becomes possible. Faith is the foundation of all spiritual progress.",
        hi: "विश्वास ईश्वर और शिक्षाओं में आस्था है। विश्वास से असंभव भी संभव हो जाता है। विश्वास सभी आध्यात्मिक प्रगति की नींव है।",
        te: "విశ్వాసం దేవతపై మరియు చెప్పిన విషయాలపై నమ్మకం. విశ్వాసం చేత అసాధ్యం కూడా సాధ్యమవుతుంది. విశ్వాసం అన్ని ఆధ్యాత్మిక పురోగతికి పునాది.",
        kn: "ವಿಶ್ವಾಸವು ದೇವರ ಮೇಲೆ ಮತ್ತು ಬೋಧನೆಯ ಮೇಲೆ ಆಸ್ಥೆ. ವಿಶ್ವಾಸದಿಂದ ಅಸಾಧ್ಯವೂ ಸಾಧ್ಯವಾಗಿ ಹೋಗುತ್ತದೆ. ವಿಶ್ವಾಸವು ಎಲ್ಲಾ ಆಧ್ಯಾತ್ಮಿಕ ಪ್ರಗತಿಯ ಆಧಾರ.",
    },
    Topic {
        keyword: "service",
        native_keywords: &["सेवा", "సేవ", "ಸೇವೆ"],
        en: "Service to humanity is service to God. By serving others selflessly, we purify our hearts and progress on the spiritual path.",
        hi: "मानवता की सेवा ईश्वर की सेवा है। निःस्वार्थ सेवा करके हम अपने हृदय को शुद्ध करते हैं और आध्यात्मिक पथ पर आगे बढ़ते हैं।",
        te: "మానవతకు సేవ దేవతకు సేవ. స్వార్థరహితంగా ఇతరులకు సేవ చేయడం ద్వారా, మనం మన హృదయాలను శుద్ధీకరించుకుంటాము మరియు ఆధ్యాత్మిక మార్గంలో ముందుకు సాగుతాము.",
        kn: "ಮಾನವತೆಗೆ ಸೇವೆ ದೇವರಿಗೆ ಸೇವೆ. ನಿಸ್ವಾರ್ಥವಾಗಿ ಇತರರಿಗೆ ಸೇವೆ ಮಾಡುವ ಮೂಲಕ, ನಾವು ನಮ್ಮ ಹೃದಯವನ್ನು ಪವಿತ್ರಪಡಿಸುತ್ತೇವೆ ಮತ್ತು ಆಧ್ಯಾತ್ಮಿಕ ಮಾರ್ಗದಲ್ಲಿ ಮುಂದುವರಿಯುತ್ತೇವೆ.",
    },
    Topic {
        keyword: "purpose",
        native_keywords: &["उद्देश्य", "ఉద్దేశ్యం", "ಉದ್ದೇಶ"],
        en: "The purpose of life is to realize your divine nature and to serve humanity. Every soul is on a journey of self-realization.",
        hi: "जीवन का उद्देश्य अपनी दिव्य प्रकृति को जानना और मानवता की सेवा करना है। प्रत्येक आत्मा आत्म-साक्षात्कार की यात्रा पर है।",
        te: "జీవితం యొక్క ఉద్దేశ్యం తన దివ్య స్వభావాన్ని గ్రహించడం మరియు మానవతకు సేవ చేయడం. ప్రతి ఆత్మ స్వీయ-సాక్షాత్కారం యొక్క ఆధ్యాత్మిక ప్రయాణంలో ఉంది.",
        kn: "ಜೀವನದ ಉದ್ದೇಶವು ನಿಮ್ಮ ದೈವಿಕ ಸ್ವಭಾವವನ್ನು ಅರ್ಥಮಾಡಿಕೊಳ್ಳುವುದು ಮತ್ತು ಮಾನವತೆಗೆ ಸೇವೆ ಮಾಡುವುದು. ಪ್ರತಿಯೊಂದು ಆತ್ಮವು ಸ್ವ-ಸಾಕ್ಷಾತ್ಕಾರದ ಯಾತ್ರೆಯಲ್ಲಿದೆ.",
    },
    Topic {
        keyword: "karma",
        native_keywords: &["कर्म", "కర్మ", "ಕರ್ಮ"],
        en: "Karma is the law of action and consequence. Your actions create your destiny. Good actions lead to good results, and bad actions to bad results.",
        hi: "कर्म क्रिया और परिणाम का नियम है। आपके कार्य आपकी नियति को बनाते हैं। अच्छे कर्म अच्छे परिणाम देते हैं, और बुरे कर्म बुरे परिणाम।",
        te: "కర్మ చర్య మరియు ఫలితం యొక్క నియమం. మీ చర్యలు మీ విధిని సృష్టిస్తాయి. మంచి చర్యలు మంచి ఫలితాలను, చెడ్డ చర్యలు చెడ్డ ఫలితాలను ఇస్తాయి.",
        kn: "ಕರ್ಮವು ಕ್ರಿಯೆ ಮತ್ತು ಪರಿಣಾಮದ ನಿಯಮ. ನಿಮ್ಮ ಕ್ರಿಯೆಗಳು ನಿಮ್ಮ ಭವಿಷ್ಯವನ್ನು ರಚಿಸುತ್ತವೆ. ಉತ್ತಮ ಕ್ರಿಯೆಗಳು ಉತ್ತಮ ಫಲಿತಾಂಶಗಳನ್ನು ನೀಡುತ್ತವೆ, ಮತ್ತು ಕೆಟ್ಟ ಕ್ರಿಯೆಗಳು ಕೆಟ್ಟ ಫಲಿತಾಂಶಗಳನ್ನು.",
    },
    Topic {
        keyword: "meditation",
        native_keywords: &["ध्यान", "ధ్యానం", "ಧ್ಯಾನ"],
        en: "Meditation is a practice to calm the mind and connect with the divine within. Through regular meditation, one experiences peace and spiritual growth.",
        hi: "ध्यान मन को शांत करने और अपने भीतर के दिव्य से जुड़ने की प्रथा है। नियमित ध्यान से व्यक्ति को शांति और आध्यात्मिक विकास का अनुभव होता है।",
        te: "ధ్యానం మనస్సును శాంతపరచటానికి మరియు లోపలి దివ్యంతో అనుసంధానం కావటానికి ఒక అభ్యాసం. నియమిత ధ్యానం ద్వారా, శాంతి మరియు ఆధ్యాత్మిక వృద్ధి అనుభవమవుతాయి.",
        kn: "ಧ್ಯಾನವು ಮನಸ್ಸನ್ನು ಶಾಂತಪಡಿಸುವ ಮತ್ತು ಒಳಗಿನ ದೈವದೊಂದಿಗೆ ಸಂಪರ್ಕ ಸ್ಥಾಪಿಸುವ ಅಭ್ಯಾಸ. ನಿಯಮಿತ ಧ್ಯಾನದ ಮೂಲಕ, ಒಬ್ಬ ಶಾಂತಿ ಮತ್ತು ಆಧ್ಯಾತ್ಮಿಕ ಬೆಳವಣಿಗೆಯನ್ನು ಅನುಭವಿಸುತ್ತಾನೆ.",
    },
    Topic {
        keyword: "truth",
        native_keywords: &["सत्य", "సత్యం", "ಸತ್ಯ"],
        en: "Truth is the ultimate reality. Speaking truth and living truthfully is essential for spiritual progress.",
        hi: "सत्य परम वास्तविकता है। सत्य बोलना और सत्य से जीना आध्यात्मिक प्रगति के लिए आवश्यक है।",
        te: "సత్యం అంతిమ వాస్తవం. సత్యాన్ని చెప్పడం మరియు సత్యముతో జీవించడం ఆధ్యాత్మిక అభివృద్ధికి ముఖ్యమైనది.",
        kn: "ಸತ್ಯವು ಅಂತಿಮ ವಾಸ್ತವತೆ. ಸತ್ಯವನ್ನು ಹೇಳುವುದು ಮತ್ತು ಸತ್ಯಯುತವಾಗಿ ಬದುಕುವುದು ಆಧ್ಯಾತ್ಮಿಕ ಪ್ರಗತಿಗೆ ಅಗತ್ಯ.",
    },
    Topic {
        keyword: "love",
        native_keywords: &["प्रेम", "ప్రేమ", "ಪ್ರೀತಿ"],
        en: "Love is the divine force. Universal love transcends all boundaries and is the path to enlightenment.",
        hi: "प्रेम दिव्य शक्ति है। सार्वभौमिक प्रेम सभी सीमाओं से परे है और मुक्ति का मार्ग है।",
        te: "ప్రేమ దివ్య శక్తి. సర్వత్ర ప్రేమ అన్ని సరిహద్దులను అతిక్రమించి, ఆధ్యాత్మిక ఎదుగుదల యొక్క మార్గం.",
        kn: "ಪ್ರೀತಿ ದೈವಿಕ ಶಕ್ತಿ. ವಿಶ್ವಜನೀನ ಪ್ರೀತಿ ಎಲ್ಲಾ ಗಡಿಗಳನ್ನು ಮೀರಿ ಆಧ್ಯಾತ್ಮಿಕ ಜ್ಞಾನದ ಮಾರ್ಗ.",
    },
    Topic {
        keyword: "peace",
        native_keywords: &["शांति", "శాంతి", "ಶಾಂತಿ"],
        en: "True peace comes from within, from self-realization and connection with the divine. It is not dependent on external circumstances.",
        hi: "सच्ची शांति भीतर से आती है, आत्म-साक्षात्कार और दिव्य से जुड़ाव से। यह बाहरी परिस्थितियों पर निर्भर नहीं है।",
        te: "నిజమైన శాంతి లోపల నుండి, స్వీయ-సాక్షాత్కారం మరియు దివ్యానికి సంబంధం నుండి వస్తుంది. ఇది బాహ్య పరిస్థితులపై ఆధారపడి లేదు.",
        kn: "ನಿಜವಾದ ಶಾಂತಿ ಒಳಗಿನಿಂದ, ಸ್ವ-ಸಾಕ್ಷಾತ್ಕಾರ ಮತ್ತು ದೈವಿಕ ಸಂಪರ್ಕದಿಂದ ಬರುತ್ತದೆ. ಇದು ಬಾಹ್ಯ ಪರಿಸ್ಥಿತಿಗಳ ಮೇಲೆ ಅವಲಂಬಿತವಲ್ಲ.",
    },
    Topic {
        keyword: "dharma",
        native_keywords: &["धर्म", "ధర్మ", "ಧರ್ಮ"],
        en: "Dharma is righteous duty. Following one's dharma is the path to happiness and spiritual progress.",
        hi: "धर्म सही कर्तव्य है। अपने धर्म का पालन करना सुख और आध्यात्मिक प्रगति का मार्ग है।",
        te: "ధర్మం నీతిమంతమైన కర్తవ్యం. తన ధర్మాన్ని అనుసరించడం ఆనందం మరియు ఆధ్యాత్మిక ప్రగతి యొక్క మార్గం.",
        kn: "ಧರ್ಮವು ನೀತಿಸಮ್ಮತ ಕರ್ತವ್ಯ. ತನ್ನ ಧರ್ಮವನ್ನು ಅನುಸರಿಸುವುದು ಸುಖ ಮತ್ತು ಆಧ್ಯಾತ್ಮಿಕ ಪ್ರಗತಿಯ ಮಾರ್ಗ.",
    },
    Topic {
        keyword: "wisdom",
        native_keywords: &["ज्ञान", "జ్ఞానం", "ಜ್ಞಾನ"],
        en: "Wisdom is understanding the true nature of reality. Wisdom comes from spiritual practice and study of sacred teachings.",
        hi: "ज्ञान वास्तविकता की सच्ची प्रकृति को समझना है। ज्ञान आध्यात्मिक साधना और पवित्र शिक्षाओं के अध्ययन से आता है।",
        te: "జ్ఞానం వాస్తవం యొక్క నిజమైన స్వభావాన్ని అర్థం చేసుకోవడం. జ్ఞానం ఆధ్యాత్మిక సాధన మరియు పవిత్ర బోధల అధ్యయనం నుండి వస్తుంది.",
        kn: "ಜ್ಞಾನವು ಯಥಾರ್ಥತೆಯ ಸತ್ಯ ಸ್ವಭಾವವನ್ನು ಅರ್ಥಮಾಡಿಕೊಳ್ಳುವುದು. ಜ್ಞಾನ ಆಧ್ಯಾತ್ಮಿಕ ಸಾಧನೆ ಮತ್ತು ಪವಿತ್ರ ಬೋಧನೆಗಳ ಅಧ್ಯಯನದಿಂದ ಬರುತ್ತದೆ.",
    },
    Topic {
        keyword: "god",
        native_keywords: &["ईश्वर", "भगवान", "దేవుడు", "ದೇವರು"],
        en: "God is the ultimate reality, the source of all existence. God is omnipotent, omniscient, and omnipresent, present in every being.",
        hi: "ईश्वर परम वास्तविकता है, सभी अस्तित्व का स्रोत है। ईश्वर सर्वशक्तिमान, सर्वज्ञ, और सर्वव्यापी है।",
        te: "దేవుడు అంతిమ వాస్తవం, అన్ని ఉనికి యొక్క మూలం. దేవుడు సర్వశక్తిమంతుడు, సర్వజ్ఞుడు మరియు సర్వవ్యాపి.",
        kn: "ದೇವರು ಅಂತಿಮ ವಾಸ್ತವತೆ, ಎಲ್ಲ ಅಸ್ತಿತ್ವದ ಮೂಲ. ದೇವರು ಸರ್ವಶಕ್ತ, ಸರ್ವಜ್ಞ, ಮತ್ತು ಸರ್ವವ್ಯಾಪಕ.",
    },
];

fn default_answer(language: Language) -> &'static str {
    match language {
        Language::En => {
            "This is a profound question. Based on Sai Baba's teachings, I encourage you to engage in regular spiritual practice, serve others with love and compassion, meditate and reflect on the divine, study sacred teachings, and cultivate devotion and faith."
        }
        Language::Hi => {
            "यह एक गहरा प्रश्न है। साईं बाबा की शिक्षाओं के अनुसार, मैं आपको प्रोत्साहित करता हूं कि आप नियमित आध्यात्मिक अभ्यास करें, प्रेम और करुणा से दूसरों की सेवा करें, ध्यान और चिंतन करें, पवित्र शिक्षाओं का अध्ययन करें, और भक्ति और विश्वास विकसित करें।"
        }
        Language::Te => {
            "ఇది ఒక లోతైన ప్రశ్న. సాయి బాబా బోధల ప్రకారం, నేను మిమ్మల్ని ప్రోత్సహిస్తాను: సాధారణ ఆధ్యాత్మిక ఆచరణను కొనసాగించండి, ప్రేమతో మరియు దయతో ఇతరులకు సేవ చేయండి, ధ్యానించండి మరియు ఆలోచించండి, పవిత్ర బోధలను అధ్యయనం చేయండి, మరియు భక్తి మరియు విశ్వాసాన్ని పెంపొందించండి."
        }
        Language::Kn => {
            "ಇದು ಗಂಭೀರವಾದ ಪ್ರಶ್ನೆ. ಸಾಯಿ ಬಾಬಾ ಅವರ ಬೋಧನೆಗಳ ಆಧಾರದ ಮೇಲೆ ನಾನು ನಿಮಗೆ ಸಲಹೆ ನೀಡುತ್ತೇನೆ: ನಿಯಮಿತ ಆಧ್ಯಾತ್ಮಿಕ ಅಭ್ಯಾಸವನ್ನು ಅನುಸರಿಸಿ, ಪ್ರೀತಿ ಮತ್ತು ಕರುಣೆಯಿಂದ ಇತರರಿಗೆ ಸೇವೆ ನೀಡಿ, ಧ್ಯಾನ ಮತ್ತು ಚಿಂತನೆ ಮಾಡಿ, ಪವಿತ್ರ ಬೋಧನೆಗಳನ್ನು ಅಧ್ಯಯನ ಮಾಡಿ, ಮತ್ತು ಭಕ್ತಿ ಮತ್ತು ವಿಶ್ವಾಸವನ್ನು ವೃದ್ಧಿಪಡಿಸಿಕೊಳ್ಳಿ."
        }
    }
}

impl Topic {
    fn answer(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Hi => self.hi,
            Language::Te => self.te,
            Language::Kn => self.kn,
        }
    }
}

impl TopicTable {
    /// Answer a question from the static tables. Always produces text; the
    /// per-language default covers questions matching no topic.
    pub fn answer(question: &str, language: Language) -> String {
        let question_lower = question.to_lowercase();

        for topic in TOPICS {
            if question_lower.contains(topic.keyword) {
                return topic.answer(language).to_string();
            }
            if topic
                .native_keywords
                .iter()
                .any(|kw| question.contains(kw))
            {
                return topic.answer(language).to_string();
            }
        }

        default_answer(language).to_string()
    }

    /// Verify every topic carries text for every language. Run at startup
    /// so a gap in the tables fails loudly instead of at request time.
    pub fn validate() -> crate::error::Result<()> {
        for topic in TOPICS {
            for language in [Language::En, Language::Hi, Language::Te, Language::Kn] {
                if topic.answer(language).trim().is_empty() {
                    return Err(crate::error::SatsangError::Config(format!(
                        "Topic table missing '{}' answer for {}",
                        topic.keyword,
                        language.code()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_keyword_match() {
        let answer = TopicTable::answer("What is devotion?", Language::En);
        assert!(answer.starts_with("Devotion is the path of love"));
    }

    #[test]
    fn test_keyword_answer_in_requested_language() {
        let answer = TopicTable::answer("Tell me about karma please", Language::Hi);
        assert!(answer.contains("कर्म"));
    }

    #[test]
    fn test_native_script_keyword_match() {
        let answer = TopicTable::answer("भक्ति क्या है और कैसे करें?", Language::Hi);
        assert!(answer.starts_with("भक्ति प्रेम"));
    }

    #[test]
    fn test_unmatched_question_gets_default() {
        let answer = TopicTable::answer("What is the weather today?", Language::En);
        assert!(answer.starts_with("This is a profound question"));
    }

    #[test]
    fn test_default_is_localized() {
        let answer = TopicTable::answer("ఈ రోజు వాతావరణం ఎలా ఉంది?", Language::Te);
        assert!(answer.contains("సాయి బాబా"));
    }

    #[test]
    fn test_tables_complete() {
        TopicTable::validate().unwrap();
    }

    #[test]
    fn test_first_matching_topic_wins() {
        // "devotion" precedes "faith" in the table.
        let answer = TopicTable::answer("Is devotion stronger than faith?", Language::En);
        assert!(answer.starts_with("Devotion"));
    }
}

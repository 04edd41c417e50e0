use super::DetectedSignal;
use crate::language::{LanguageDetector, Script};
use serde::{Deserialize, Serialize};

/// Upper bound on the multilingual contribution before it is blended into the rule score.
pub const MULTILINGUAL_CAP: u32 = 50;

// (exact phrase, label, weight), matched by substring against the raw message.
const HINDI_PHRASES: &[(&str, &str, u32)] = &[
    ("अभी क्लिक करें", "click now (Hindi)", 10),
    ("तुरंत", "immediately (Hindi)", 6),
    ("अर्जेंट", "urgent (Hindi)", 6),
    ("जीता है", "won (Hindi)", 8),
    ("इनाम", "prize/reward (Hindi)", 8),
    ("लॉटरी", "lottery (Hindi)", 10),
    ("ओटीपी", "OTP (Hindi)", 10),
    ("बैंक खाता", "bank account (Hindi)", 5),
    ("बंद हो जाएगा", "will be blocked (Hindi)", 8),
    ("केवाईसी", "KYC (Hindi)", 10),
    ("आधार", "Aadhaar (Hindi)", 8),
    ("पैन कार्ड", "PAN card (Hindi)", 8),
    ("सत्यापन", "verification (Hindi)", 5),
    ("निःशुल्क", "free (Hindi)", 4),
    ("जीत", "win (Hindi)", 6),
    ("पुरस्कार", "reward (Hindi)", 6),
    ("दावा", "claim (Hindi)", 5),
    ("सीमित समय", "limited time (Hindi)", 6),
    ("तत्काल", "urgent/immediate (Hindi)", 7),
];

const TAMIL_PHRASES: &[(&str, &str, u32)] = &[
    ("இப்போதே கிளிக் செய்யவும்", "click now (Tamil)", 10),
    ("உடனடியாக", "immediately (Tamil)", 6),
    ("அவசரம்", "urgent (Tamil)", 6),
    ("வென்றீர்கள்", "you won (Tamil)", 8),
    ("பரிசு", "prize (Tamil)", 8),
    ("லாட்டரி", "lottery (Tamil)", 10),
    ("ஓடிபி", "OTP (Tamil)", 10),
    ("வங்கி கணக்கு", "bank account (Tamil)", 5),
    ("தடுக்கப்படும்", "will be blocked (Tamil)", 8),
    ("கேஒய்சி", "KYC (Tamil)", 10),
    ("ஆதார்", "Aadhaar (Tamil)", 8),
    ("பான் கார்டு", "PAN card (Tamil)", 8),
    ("இலவசம்", "free (Tamil)", 4),
    ("வெற்றி", "win (Tamil)", 6),
    ("கோரிக்கை", "claim (Tamil)", 5),
];

const TELUGU_PHRASES: &[(&str, &str, u32)] = &[
    ("ఇప్పుడే క్లిక్ చేయండి", "click now (Telugu)", 10),
    ("వెంటనే", "immediately (Telugu)", 6),
    ("అర్జెంట్", "urgent (Telugu)", 6),
    ("గెలిచారు", "you won (Telugu)", 8),
    ("బహుమతి", "prize (Telugu)", 8),
    ("లాటరీ", "lottery (Telugu)", 10),
    ("ఓటీపీ", "OTP (Telugu)", 10),
    ("బ్యాంకు ఖాతా", "bank account (Telugu)", 5),
    ("బ్లాక్ అవుతుంది", "will be blocked (Telugu)", 8),
    ("కేవైసీ", "KYC (Telugu)", 10),
    ("ఆధార్", "Aadhaar (Telugu)", 8),
    ("పాన్ కార్డు", "PAN card (Telugu)", 8),
    ("ఉచితం", "free (Telugu)", 4),
    ("గెలుపు", "win (Telugu)", 6),
    ("క్లెయిమ్", "claim (Telugu)", 5),
];

// Romanised forms, matched against the lower-cased message.
const TRANSLITERATED_PHRASES: &[(&str, &str, u32)] = &[
    ("abhi click karo", "click now (Hinglish)", 10),
    ("turant", "immediately (Hinglish)", 6),
    ("jeet gaye", "you won (Hinglish)", 8),
    ("inaam", "prize (Hinglish)", 8),
    ("lottery jeet", "lottery win (Hinglish)", 10),
    ("otp share karo", "share OTP (Hinglish)", 12),
    ("khata band", "account blocked (Hinglish)", 8),
    ("kyc update karo", "KYC update (Hinglish)", 10),
    ("aadhaar verify", "Aadhaar verify (Hinglish)", 8),
    ("free mein", "for free (Hinglish)", 4),
    ("claim karo", "claim (Hinglish)", 5),
    ("abhi verify karo", "verify now (Hinglish)", 7),
    ("bank se call", "bank call (Hinglish)", 5),
    ("paisa milega", "will get money (Hinglish)", 6),
];

/// One script's phrase table. Tables whose script is absent from a message are skipped.
pub struct PhraseTable {
    pub script: Script,
    pub phrases: &'static [(&'static str, &'static str, u32)],
}

pub const SCRIPT_TABLES: &[PhraseTable] = &[
    PhraseTable {
        script: Script::Devanagari,
        phrases: HINDI_PHRASES,
    },
    PhraseTable {
        script: Script::Tamil,
        phrases: TAMIL_PHRASES,
    },
    PhraseTable {
        script: Script::Telugu,
        phrases: TELUGU_PHRASES,
    },
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultilingualScan {
    /// Sum of matched phrase weights, capped at [`MULTILINGUAL_CAP`].
    pub score: u32,
    /// Labels in table order. A label can repeat when overlapping phrases share it.
    pub flags: Vec<String>,
    pub signals: Vec<DetectedSignal>,
    /// Regional languages whose script occurs anywhere in the message.
    pub languages: Vec<String>,
}

#[derive(Default)]
pub struct MultilingualEngine;

impl MultilingualEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, message: &str) -> MultilingualScan {
        let mut signals = Vec::new();
        let scripts = LanguageDetector::detect_scripts(message);

        for table in SCRIPT_TABLES.iter().filter(|t| scripts.contains(&t.script)) {
            for (phrase, label, weight) in table.phrases {
                if message.contains(phrase) {
                    signals.push(DetectedSignal {
                        label: label.to_string(),
                        weight: *weight,
                    });
                }
            }
        }

        let message_lower = message.to_lowercase();
        for (phrase, label, weight) in TRANSLITERATED_PHRASES {
            if message_lower.contains(phrase) {
                signals.push(DetectedSignal {
                    label: label.to_string(),
                    weight: *weight,
                });
            }
        }

        let raw: u32 = signals.iter().map(|s| s.weight).sum();
        let flags = signals.iter().map(|s| s.label.clone()).collect();

        MultilingualScan {
            score: raw.min(MULTILINGUAL_CAP),
            flags,
            signals,
            languages: scripts.iter().map(|s| s.language_name().to_string()).collect(),
        }
    }

    pub fn phrase_count(&self) -> usize {
        SCRIPT_TABLES.iter().map(|t| t.phrases.len()).sum::<usize>() + TRANSLITERATED_PHRASES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hindi_phrases_in_table_order() {
        let scan = MultilingualEngine::new().analyze("आपने लॉटरी जीता है");

        // "जीत" is a prefix of "जीता है", so both entries fire.
        assert_eq!(
            scan.flags,
            vec!["won (Hindi)", "lottery (Hindi)", "win (Hindi)"]
        );
        assert_eq!(scan.score, 8 + 10 + 6);
        assert_eq!(scan.languages, vec!["Hindi"]);
    }

    #[test]
    fn test_transliterated_phrases_are_case_insensitive() {
        let scan = MultilingualEngine::new().analyze("Bhai TURANT otp share karo");

        assert_eq!(
            scan.flags,
            vec!["immediately (Hinglish)", "share OTP (Hinglish)"]
        );
        assert_eq!(scan.score, 18);
        assert!(scan.languages.is_empty());
    }

    #[test]
    fn test_score_is_capped_at_fifty() {
        let scan = MultilingualEngine::new()
            .analyze("अभी क्लिक करें तुरंत लॉटरी ओटीपी केवाईसी आधार पैन कार्ड");

        let raw: u32 = scan.signals.iter().map(|s| s.weight).sum();
        assert!(raw > MULTILINGUAL_CAP);
        assert_eq!(scan.score, MULTILINGUAL_CAP);
    }

    #[test]
    fn test_tamil_and_telugu() {
        let engine = MultilingualEngine::new();

        let tamil = engine.analyze("உங்களுக்கு பரிசு கிடைத்துள்ளது");
        assert_eq!(tamil.flags, vec!["prize (Tamil)"]);
        assert_eq!(tamil.languages, vec!["Tamil"]);

        let telugu = engine.analyze("మీకు బహుమతి వచ్చింది");
        assert_eq!(telugu.flags, vec!["prize (Telugu)"]);
        assert_eq!(telugu.score, 8);
    }

    #[test]
    fn test_script_without_phrase_is_reported_but_unscored() {
        let scan = MultilingualEngine::new().analyze("नमस्ते");
        assert_eq!(scan.score, 0);
        assert!(scan.flags.is_empty());
        assert_eq!(scan.languages, vec!["Hindi"]);
    }

    #[test]
    fn test_english_message_has_no_flags() {
        let scan = MultilingualEngine::new().analyze("Meeting rescheduled to 3pm tomorrow");
        assert_eq!(scan.score, 0);
        assert!(scan.flags.is_empty());
    }

    #[test]
    fn test_phrase_count() {
        assert_eq!(MultilingualEngine::new().phrase_count(), 19 + 15 + 15 + 14);
    }
}

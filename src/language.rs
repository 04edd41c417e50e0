use serde::{Deserialize, Serialize};

/// Regional scripts the multilingual phrase tables cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Devanagari,
    Tamil,
    Telugu,
}

impl Script {
    pub fn language_name(&self) -> &'static str {
        match self {
            Script::Devanagari => "Hindi",
            Script::Tamil => "Tamil",
            Script::Telugu => "Telugu",
        }
    }
}

pub struct LanguageDetector;

impl LanguageDetector {
    fn contains_devanagari(text: &str) -> bool {
        text.chars().any(|c| {
            matches!(c,
                '\u{0900}'..='\u{097F}' |  // Devanagari
                '\u{A8E0}'..='\u{A8FF}'    // Devanagari Extended
            )
        })
    }

    fn contains_tamil(text: &str) -> bool {
        text.chars().any(|c| matches!(c, '\u{0B80}'..='\u{0BFF}'))
    }

    fn contains_telugu(text: &str) -> bool {
        text.chars().any(|c| matches!(c, '\u{0C00}'..='\u{0C7F}'))
    }

    /// Scripts present in the text, always in Devanagari, Tamil, Telugu order.
    pub fn detect_scripts(text: &str) -> Vec<Script> {
        let mut scripts = Vec::new();

        if Self::contains_devanagari(text) {
            scripts.push(Script::Devanagari);
        }
        if Self::contains_tamil(text) {
            scripts.push(Script::Tamil);
        }
        if Self::contains_telugu(text) {
            scripts.push(Script::Telugu);
        }

        scripts
    }
}

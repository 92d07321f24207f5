//! Best-effort language detection from common function words

use crate::model::LanguageInfo;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Minimum marker hits before a language is reported
const MIN_MARKER_HITS: usize = 2;

const MARKERS: &[(&str, &[&str])] = &[
    ("en", &["the", "and", "is", "are", "of", "to", "in", "that", "with", "for", "was", "this"]),
    ("es", &["el", "los", "las", "que", "y", "es", "por", "para", "con", "una", "del", "está"]),
    ("fr", &["le", "les", "des", "est", "et", "une", "dans", "pour", "avec", "sur", "du", "sont"]),
    ("de", &["der", "die", "das", "und", "ist", "nicht", "mit", "ein", "eine", "zu", "den", "auf"]),
    ("pt", &["os", "não", "uma", "com", "para", "são", "mais", "como", "foi", "pelo", "ao", "às"]),
    ("it", &["il", "gli", "di", "che", "è", "per", "una", "sono", "della", "non", "nel", "anche"]),
];

/// Detect the dominant language; `unknown` when there is too little signal
pub fn detect_language(text: &str) -> LanguageInfo {
    let lower = text.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .collect();

    let hits: Vec<(&str, usize)> = MARKERS
        .iter()
        .map(|(code, words)| {
            let count = tokens.iter().filter(|t| words.contains(*t)).count();
            (*code, count)
        })
        .collect();

    let total: usize = hits.iter().map(|(_, c)| c).sum();

    // first language wins ties
    let mut best = ("", 0usize);
    for &(code, count) in &hits {
        if count > best.1 {
            best = (code, count);
        }
    }

    if best.1 < MIN_MARKER_HITS {
        return LanguageInfo {
            detected: UNKNOWN_LANGUAGE.to_string(),
            confidence: 0.0,
            translated: false,
        };
    }

    LanguageInfo {
        detected: best.0.to_string(),
        confidence: best.1 as f64 / total as f64,
        translated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_english() {
        let info = detect_language("The report says that the vaccine is safe and effective for adults.");
        assert_eq!(info.detected, "en");
        assert!(info.confidence > 0.5);
    }

    #[test]
    fn test_detect_spanish() {
        let info = detect_language("El gobierno dice que los precios por la energía son más altos para las familias.");
        assert_eq!(info.detected, "es");
    }

    #[test]
    fn test_detect_german() {
        let info = detect_language("Die Regierung sagt, dass der Preis nicht mit den Kosten und der Inflation steigt.");
        assert_eq!(info.detected, "de");
    }

    #[test]
    fn test_unknown_without_markers() {
        let info = detect_language("12345 67890 !!! ???");
        assert_eq!(info.detected, UNKNOWN_LANGUAGE);
        assert_eq!(info.confidence, 0.0);
    }
}

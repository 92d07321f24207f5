//! Sentence segmentation, context windows and keyword extraction

use std::sync::LazyLock;

use regex::Regex;

use crate::model::TextPosition;

/// Fragments shorter than this (in characters) are not sentences
pub const MIN_SENTENCE_LENGTH: usize = 10;

const MAX_KEYWORDS: usize = 10;

static SENTENCE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence terminator pattern"));

pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "been", "before", "being", "below",
    "between", "both", "could", "does", "doing", "down", "during", "each", "from", "further",
    "have", "having", "here", "into", "just", "more", "most", "much", "only", "other", "over",
    "same", "should", "some", "such", "than", "that", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "under", "until", "very", "were",
    "what", "when", "where", "which", "while", "will", "with", "would", "your", "yours",
];

/// A sentence with its character offsets in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub position: TextPosition,
}

/// Converts byte offsets to character offsets, walking forward only
struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn at(&mut self, byte: usize) -> usize {
        if byte >= self.byte {
            self.chars += self.text[self.byte..byte].chars().count();
        } else {
            self.chars = self.text[..byte].chars().count();
        }
        self.byte = byte;
        self.chars
    }
}

/// Split text on runs of sentence-terminal punctuation, dropping short fragments
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut bounds = Vec::new();
    let mut last = 0;
    for m in SENTENCE_TERMINATOR.find_iter(text) {
        bounds.push((last, m.start()));
        last = m.end();
    }
    if last < text.len() {
        bounds.push((last, text.len()));
    }

    let mut offsets = CharOffsets::new(text);
    let mut sentences = Vec::new();

    for (from, to) in bounds {
        let segment = &text[from..to];
        let trimmed = segment.trim();
        if trimmed.chars().count() < MIN_SENTENCE_LENGTH {
            continue;
        }

        let start_byte = from + (segment.len() - segment.trim_start().len());
        let end_byte = start_byte + trimmed.len();
        let start = offsets.at(start_byte);
        let end = offsets.at(end_byte);

        sentences.push(Sentence {
            text: trimmed.to_string(),
            position: TextPosition { start, end },
        });
    }

    sentences
}

/// Text within `window` characters either side of a span, clipped to the text bounds
pub fn context_window(text: &str, position: TextPosition, window: usize) -> String {
    let from = position.start.saturating_sub(window);
    let to = position.end.saturating_add(window);
    text.chars()
        .skip(from)
        .take(to.saturating_sub(from))
        .collect::<String>()
        .trim()
        .to_string()
}

/// First ten distinct significant tokens, in order of appearance
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() <= 3 || STOP_WORDS.contains(&token) {
            continue;
        }
        if keywords.iter().any(|k| k == token) {
            continue;
        }
        keywords.push(token.to_string());
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }

    keywords
}

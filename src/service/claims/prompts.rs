//! Canned questions for the extractive QA path

/// Questions asked against the full text; each answer span is a candidate claim
pub const EXTRACTION_QUESTIONS: &[&str] = &[
    "What facts are stated in this text?",
    "What claims are made in this text?",
    "What statistics or numbers are mentioned?",
];

/// Answers scoring at or below this are discarded
pub const MIN_ANSWER_SCORE: f64 = 0.3;

/// Answers this short (in characters) or shorter are discarded
pub const MIN_ANSWER_LENGTH: usize = 10;

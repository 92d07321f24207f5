//! Black-box inference collaborators: zero-shot classification, extractive
//! question answering and translation

use async_trait::async_trait;

mod huggingface;

pub use huggingface::HuggingFaceClient;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Top label of a zero-shot classification
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub top_label: String,
    pub score: f64,
}

/// Answer span returned by extractive QA; offsets are character offsets into the context
#[derive(Debug, Clone, PartialEq)]
pub struct QaAnswer {
    pub answer: String,
    pub score: f64,
    pub start: usize,
    pub end: usize,
}

#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification, InferenceError>;
}

#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, InferenceError>;
}

/// Translates text into the canonical working language (English)
#[async_trait]
pub trait LanguageNormalizer: Send + Sync {
    async fn translate_to_english(
        &self,
        text: &str,
        source_language: &str,
    ) -> Result<String, InferenceError>;
}

//! Error types for claim extraction

use thiserror::Error;

/// Error type for claim extraction
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClaimExtractionError {
    #[error("Text too short: {length} characters, at least 50 required")]
    InputTooShort { length: usize },

    #[error("Text too long: {length} characters, at most 50000 allowed")]
    InputTooLong { length: usize },

    #[error("No sentences found in text")]
    NoSentences,
}

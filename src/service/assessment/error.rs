//! Error types for credibility assessment

use thiserror::Error;

/// Internal assessment failure; never surfaced past the scorer
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Claim text is empty")]
    EmptyClaim,

    #[error("Credibility factors are not finite: {0}")]
    InvalidFactors(String),
}

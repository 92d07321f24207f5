//! Pipeline-level error taxonomy

use thiserror::Error;

use crate::service::claims::ClaimExtractionError;

/// Failure of a whole analysis run
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Analysis failed during {stage}: {message}")]
    PipelineFatal { stage: &'static str, message: String },
}

impl AnalysisError {
    /// Map an extractor failure, keeping validation errors distinct
    pub fn from_extraction(stage: &'static str, error: ClaimExtractionError) -> Self {
        match error {
            ClaimExtractionError::InputTooShort { .. } | ClaimExtractionError::InputTooLong { .. } => {
                AnalysisError::InputValidation(error.to_string())
            }
            other => AnalysisError::PipelineFatal {
                stage,
                message: other.to_string(),
            },
        }
    }
}

//! Generative reasoning: topic extraction and structured claim analysis
//!
//! Output from the model is validated before use. Failures never reach the
//! caller: topic extraction yields `None` and claim analysis yields a neutral,
//! low-confidence result.

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{ClaimAnalysis, ExtractedClaimAnalysis, ExtractedTopics};
use crate::service::reasoning::validation::{
    clean_topics, convert_claim_analysis, validate_claim_analysis,
};

mod llm;
pub mod prompts;
pub mod validation;

pub use llm::LlmReasoner;

#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    #[error("Failed to create reasoning client: {0}")]
    ClientSetup(String),

    #[error("LLM extraction failed: {0}")]
    ExtractionFailed(String),
}

/// External generative-reasoning collaborator
#[async_trait]
pub trait ClaimReasoner: Send + Sync {
    async fn extract_topics(&self, text: &str) -> Result<ExtractedTopics, ReasoningError>;

    async fn analyze_claim(&self, claim: &str) -> Result<ExtractedClaimAnalysis, ReasoningError>;
}

/// Validating wrapper around a [`ClaimReasoner`]
pub struct ReasoningService {
    reasoner: Arc<dyn ClaimReasoner>,
}

impl ReasoningService {
    pub fn new(reasoner: Arc<dyn ClaimReasoner>) -> Self {
        Self { reasoner }
    }

    /// Cleaned topics, or `None` when the call fails or yields nothing usable
    pub async fn topics(&self, text: &str) -> Option<Vec<String>> {
        match self.reasoner.extract_topics(text).await {
            Ok(extracted) => {
                let topics = clean_topics(extracted);
                if topics.is_empty() {
                    tracing::warn!("Reasoning returned no usable topics");
                    None
                } else {
                    Some(topics)
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Topic extraction unavailable");
                None
            }
        }
    }

    /// Validated claim analysis, or a neutral fallback on any failure
    pub async fn analyze_claim(&self, claim: &str) -> ClaimAnalysis {
        let extracted = match self.reasoner.analyze_claim(claim).await {
            Ok(extracted) => extracted,
            Err(e) => {
                tracing::warn!(error = %e, "Claim analysis failed, using neutral fallback");
                return ClaimAnalysis::neutral_fallback(&e.to_string());
            }
        };

        let validation = validate_claim_analysis(&extracted);
        for warning in &validation.warnings {
            tracing::debug!(warning = %warning, "Claim analysis validation warning");
        }

        if !validation.is_valid {
            tracing::warn!(
                errors = ?validation.errors,
                "Claim analysis failed validation, using neutral fallback"
            );
            return ClaimAnalysis::neutral_fallback(&validation.errors.join("; "));
        }

        convert_claim_analysis(extracted)
    }
}

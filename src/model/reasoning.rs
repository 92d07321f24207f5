//! LLM-extractable models for generative reasoning, and their validated forms

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::assessment::RiskLevel;
use super::claim::ClaimCategory;

/// LLM-extractable topic list
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedTopics {
    #[schemars(description = "Between 5 and 10 short search terms describing the main subjects")]
    pub topics: Vec<String>,
}

/// LLM-extractable claim analysis. Scores and enum-like fields are kept loose
/// here and checked before conversion into [`ClaimAnalysis`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedClaimAnalysis {
    pub is_factual: bool,

    #[schemars(description = "Credibility of the claim between 0.0 and 1.0")]
    pub credibility_score: f64,

    #[schemars(description = "One of: low, medium, high, critical")]
    pub risk_level: String,

    #[schemars(description = "One of: factual, opinion, prediction, statistical, unknown")]
    pub category: String,

    #[schemars(description = "Short explanation of the assessment")]
    pub reasoning: String,

    #[schemars(description = "Confidence in this analysis between 0.0 and 1.0")]
    pub confidence: f64,

    #[schemars(description = "Names or URLs of sources that could confirm or refute the claim")]
    #[serde(default)]
    pub suggested_sources: Vec<String>,
}

/// Validated claim analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClaimAnalysis {
    pub is_factual: bool,
    pub credibility_score: f64,
    pub risk_level: RiskLevel,
    pub category: ClaimCategory,
    pub reasoning: String,
    pub confidence: f64,
    pub suggested_sources: Vec<String>,
    /// False when this is the neutral stand-in for an unusable response
    pub validated: bool,
}

impl ClaimAnalysis {
    /// Low-confidence neutral result used when the response cannot be trusted
    pub fn neutral_fallback(reason: &str) -> Self {
        Self {
            is_factual: false,
            credibility_score: 0.5,
            risk_level: RiskLevel::Medium,
            category: ClaimCategory::Unknown,
            reasoning: format!("Reasoning analysis unavailable: {}", reason),
            confidence: 0.1,
            suggested_sources: Vec::new(),
            validated: false,
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::source::{Source, SourceOptions};

/// Estimated real-world risk, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a credibility score onto a risk level
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            RiskLevel::Low
        } else if score >= 0.6 {
            RiskLevel::Medium
        } else if score >= 0.4 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    /// Parse a risk level name; returns `None` for anything outside the enum
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

/// Categorical outcome of fact-checking a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Verified,
    Disputed,
    Unverified,
    False,
}

/// The five scoring factors, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredibilityFactors {
    pub source_reliability: f64,
    pub evidence_strength: f64,
    pub consensus_level: f64,
    pub recency: f64,
    pub author_credibility: f64,
}

impl CredibilityFactors {
    pub fn is_finite(&self) -> bool {
        [
            self.source_reliability,
            self.evidence_strength,
            self.consensus_level,
            self.recency,
            self.author_credibility,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredibilityAssessment {
    pub overall_score: f64,
    pub confidence: f64,
    pub factors: CredibilityFactors,
    pub reasoning: String,
    pub risk_level: RiskLevel,
}

/// Result of fact-checking one claim against a source set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FactCheckResult {
    pub claim_id: String,
    pub original_claim: String,
    pub credibility_score: f64,
    pub credibility_assessment: CredibilityAssessment,
    pub sources: Vec<Source>,
    pub verification_status: Verdict,
    pub processing_time_ms: u64,
}

/// Options for the credibility scorer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FactCheckOptions {
    /// Shared or generated sources below this reliability are ignored
    pub min_source_reliability: f64,
    /// Run the zero-shot cross-check that feeds the reasoning text
    pub include_ai_analysis: bool,
    /// Used when no shared source pool is supplied
    pub sources: SourceOptions,
}

impl Default for FactCheckOptions {
    fn default() -> Self {
        Self {
            min_source_reliability: 0.6,
            include_ai_analysis: true,
            sources: SourceOptions::default(),
        }
    }
}

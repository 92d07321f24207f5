use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::assessment::{FactCheckResult, RiskLevel, Verdict};
use super::claim::{Claim, ExtractionOptions};
use super::database::DatabaseMatch;
use super::reasoning::ClaimAnalysis;
use super::source::{Source, SourceOptions};

/// Options recognised by `analyze`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AnalysisOptions {
    pub max_claims: usize,
    pub min_confidence: f64,
    pub include_opinions: bool,
    /// Query the fact-check databases for every claim
    pub search_databases: bool,
    /// Probe evidence URLs for liveness
    pub verify_urls: bool,
    /// Run the generative reasoning adapter for every claim
    pub deep_analysis: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_claims: 20,
            min_confidence: 0.5,
            include_opinions: false,
            search_databases: true,
            verify_urls: true,
            deep_analysis: false,
        }
    }
}

impl AnalysisOptions {
    pub fn extraction(&self) -> ExtractionOptions {
        ExtractionOptions {
            max_claims: self.max_claims,
            min_confidence: self.min_confidence,
            include_opinions: self.include_opinions,
            ..ExtractionOptions::default()
        }
    }

    pub fn sources(&self) -> SourceOptions {
        SourceOptions {
            verify_urls: self.verify_urls,
            ..SourceOptions::default()
        }
    }
}

/// A claim with every signal gathered for it and its resolved verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnhancedClaim {
    #[serde(flatten)]
    pub claim: Claim,
    pub fact_check: FactCheckResult,
    /// Matches from providers that answered successfully
    pub database_results: Vec<DatabaseMatch>,
    pub reasoning_analysis: Option<ClaimAnalysis>,
    pub final_verdict: Verdict,
    pub harm_potential: RiskLevel,
}

/// Language metadata for the analysed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LanguageInfo {
    pub detected: String,
    pub confidence: f64,
    pub translated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OverallAssessment {
    pub credibility_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisMetadata {
    pub processing_time_ms: u64,
    /// Names of the sub-services invoked during the run
    pub services_used: Vec<String>,
    pub claims_analyzed: usize,
    pub sources_found: usize,
    pub database_queries: usize,
    pub database_failures: usize,
    pub reasoning_calls: usize,
}

/// Output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComprehensiveAnalysisResult {
    pub original_text: String,
    pub processed_text: String,
    pub language: LanguageInfo,
    pub claims: Vec<EnhancedClaim>,
    pub sources: Vec<Source>,
    pub overall_assessment: OverallAssessment,
    pub metadata: AnalysisMetadata,
}

/// Aggregate health of the external collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatus {
    pub name: String,
    pub available: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthState,
    pub services: Vec<ServiceStatus>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Verdict normalised from a provider's free-form rating string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseVerdict {
    True,
    False,
    Mixed,
    Disputed,
    Unproven,
}

/// Raw review record as returned by a fact-check database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClaimReview {
    pub claim_text: String,
    pub claimant: Option<String>,
    pub publisher: String,
    pub url: String,
    pub review_date: Option<String>,
    pub textual_rating: String,
}

/// A review record with its normalised verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseMatch {
    pub provider: String,
    #[serde(flatten)]
    pub review: ClaimReview,
    pub verdict: DatabaseVerdict,
    pub confidence: f64,
}

/// Per-provider outcome of a fan-out search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProviderOutcome {
    pub provider: String,
    pub success: bool,
    pub matches: Vec<DatabaseMatch>,
    pub error: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Stance of a source towards the analysed content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceStance {
    Supports,
    Contradicts,
    Neutral,
    InsufficientEvidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    FactCheck,
    News,
    Academic,
    Government,
    Reference,
}

/// Liveness state of a source URL. Starts `Unverified`, moves once to
/// `Verified` or `Failed` after a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceVerification {
    Verified,
    Unverified,
    Failed,
}

/// A URL-backed piece of evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Source {
    #[schema(value_type = String)]
    pub url: Url,
    pub title: String,
    pub domain: String,
    /// Static per-domain trust score
    pub reliability: f64,
    pub publish_date: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub relevance_score: f64,
    pub fact_check_result: SourceStance,
    pub source_type: SourceType,
    pub verification_status: SourceVerification,
}

impl Source {
    /// Ranking key used when selecting the best sources
    pub fn rank_score(&self) -> f64 {
        self.reliability * self.relevance_score
    }

    /// Key used to drop duplicate candidates
    pub fn dedup_key(&self) -> (String, String) {
        (self.domain.clone(), self.title.clone())
    }
}

/// Options controlling source generation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SourceOptions {
    pub max_sources: usize,
    pub min_reliability: f64,
    /// Probe each candidate for liveness before ranking
    pub verify_urls: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            max_sources: 3,
            min_reliability: 0.7,
            verify_urls: true,
        }
    }
}

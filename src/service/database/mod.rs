//! Fact-check database search
//!
//! Queries every configured ClaimReview provider concurrently. Each provider
//! owns its own per-minute quota; a failing or throttled provider is reported
//! as such without affecting the others.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Mutex;

use crate::model::config::Quota;
use crate::model::{ClaimReview, DatabaseMatch, ProviderOutcome};
use crate::service::database::normalize::normalize_rating;
use crate::service::rate_limit::RateLimiter;

mod claim_review;
pub mod normalize;

pub use claim_review::ClaimReviewProvider;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSearchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limit exceeded for provider {0}")]
    RateLimited(String),
}

/// A fact-check database searchable by claim text
#[async_trait]
pub trait FactCheckProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<ClaimReview>, DatabaseSearchError>;
}

struct ProviderSlot {
    provider: Arc<dyn FactCheckProvider>,
    limiter: Mutex<RateLimiter>,
}

/// Service fanning claim searches out to every configured provider
pub struct FactCheckDatabaseService {
    providers: Vec<ProviderSlot>,
}

impl FactCheckDatabaseService {
    pub fn new(providers: Vec<(Arc<dyn FactCheckProvider>, Quota)>) -> Self {
        let names: Vec<&str> = providers.iter().map(|(p, _)| p.name()).collect();
        tracing::info!(providers = ?names, "Fact-check database service initialized");

        Self {
            providers: providers
                .into_iter()
                .map(|(provider, quota)| ProviderSlot {
                    provider,
                    limiter: Mutex::new(quota.limiter()),
                })
                .collect(),
        }
    }

    /// Whether any provider is configured
    pub fn is_available(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Search every provider concurrently, one outcome per provider in configuration order
    pub async fn search(&self, query: &str) -> Vec<ProviderOutcome> {
        let start_time = Instant::now();

        let outcomes = join_all(self.providers.iter().map(|slot| search_provider(slot, query))).await;

        let failures = outcomes.iter().filter(|o| !o.success).count();
        tracing::info!(
            providers = outcomes.len(),
            failures = failures,
            matches = outcomes.iter().map(|o| o.matches.len()).sum::<usize>(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Fact-check database search complete"
        );

        outcomes
    }
}

async fn search_provider(slot: &ProviderSlot, query: &str) -> ProviderOutcome {
    let name = slot.provider.name().to_string();

    if !slot.limiter.lock().await.try_acquire() {
        tracing::warn!(provider = %name, "Provider quota exhausted");
        return failed(name.clone(), DatabaseSearchError::RateLimited(name));
    }

    match slot.provider.search(query).await {
        Ok(reviews) => ProviderOutcome {
            matches: reviews
                .into_iter()
                .map(|review| to_match(&name, review))
                .collect(),
            provider: name,
            success: true,
            error: None,
        },
        Err(e) => {
            tracing::warn!(provider = %name, error = %e, "Provider search failed");
            failed(name, e)
        }
    }
}

fn failed(provider: String, error: DatabaseSearchError) -> ProviderOutcome {
    ProviderOutcome {
        provider,
        success: false,
        matches: Vec::new(),
        error: Some(error.to_string()),
    }
}

fn to_match(provider: &str, review: ClaimReview) -> DatabaseMatch {
    let (verdict, confidence) = normalize_rating(&review.textual_rating);
    DatabaseMatch {
        provider: provider.to_string(),
        review,
        verdict,
        confidence,
    }
}

/// Matches from providers that succeeded
pub fn successful_matches(outcomes: Vec<ProviderOutcome>) -> Vec<DatabaseMatch> {
    outcomes
        .into_iter()
        .filter(|o| o.success)
        .flat_map(|o| o.matches)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DatabaseVerdict;
    use crate::service::testing::FakeProvider;

    fn slot(provider: FakeProvider, requests: usize) -> (Arc<dyn FactCheckProvider>, Quota) {
        (Arc::new(provider), Quota::new(requests, 60))
    }

    #[tokio::test]
    async fn test_fan_out_normalizes_ratings() {
        let service = FactCheckDatabaseService::new(vec![
            slot(FakeProvider::rating("alpha", &["Pants on Fire"]), 10),
            slot(FakeProvider::rating("beta", &["Mostly True", "Half True"]), 10),
        ]);

        let outcomes = service.search("moon landing").await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.success));

        let matches = successful_matches(outcomes);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].provider, "alpha");
        assert_eq!(matches[0].verdict, DatabaseVerdict::False);
        assert_eq!(matches[0].confidence, 0.95);
        assert_eq!(matches[2].verdict, DatabaseVerdict::Mixed);
    }

    #[tokio::test]
    async fn test_failing_provider_isolated() {
        let service = FactCheckDatabaseService::new(vec![
            slot(FakeProvider::failing("down"), 10),
            slot(FakeProvider::rating("up", &["False"]), 10),
        ]);

        let outcomes = service.search("claim").await;
        assert!(!outcomes[0].success);
        assert!(outcomes[0].error.is_some());
        assert!(outcomes[1].success);
        assert_eq!(successful_matches(outcomes).len(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_quota_marks_provider_rate_limited() {
        let service = FactCheckDatabaseService::new(vec![
            slot(FakeProvider::rating("tight", &["True"]), 1),
            slot(FakeProvider::rating("loose", &["True"]), 10),
        ]);

        let first = service.search("claim").await;
        assert!(first.iter().all(|o| o.success));

        let second = service.search("claim").await;
        assert!(!second[0].success);
        assert!(second[0].error.as_deref().unwrap_or_default().contains("Rate limit"));
        assert!(second[1].success);
    }

    #[tokio::test]
    async fn test_no_providers() {
        let service = FactCheckDatabaseService::new(Vec::new());
        assert!(!service.is_available());
        assert!(service.search("claim").await.is_empty());
    }
}

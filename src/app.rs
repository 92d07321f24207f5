//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use url::Url;

use crate::model::Config;
use crate::model::config::{ProviderConfig, Quota, RateLimitConfig};
use crate::retriever::{HttpLivenessProbe, NewsApiRetriever, NewsSearch};
use crate::service::database::{ClaimReviewProvider, FactCheckProvider};
use crate::service::health::HealthCheck;
use crate::service::ids::{IdGenerator, TimestampIdGenerator};
use crate::service::inference::{
    HuggingFaceClient, LanguageNormalizer, QuestionAnswerer, TextClassifier,
};
use crate::service::reasoning::LlmReasoner;
use crate::service::{
    AnalysisService, ClaimExtractionService, CredibilityService, FactCheckDatabaseService,
    ReasoningService, SourceService,
};

/// Application state containing all services and shared resources
pub struct AppState {
    /// End-to-end analysis pipeline
    pub analysis: Arc<AnalysisService>,
    pub claims: Arc<ClaimExtractionService>,
    pub sources: Arc<SourceService>,
    pub credibility: Arc<CredibilityService>,
    /// Identifiers for claims submitted directly to the fact-check endpoint
    pub ids: Arc<dyn IdGenerator>,
    /// Collaborators reported by the readiness probe
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Missing API keys disable the matching collaborator; only malformed
    /// configuration is an error.
    pub fn new(config: Config) -> Result<Self, AppError> {
        validate_rate_limits(&config.rate_limits)?;

        let mut health_checks: Vec<Arc<dyn HealthCheck>> = Vec::new();

        let inference = Arc::new(HuggingFaceClient::new());
        health_checks.push(inference.clone());

        let news = NewsApiRetriever::from_env().map(Arc::new);
        if let Some(ref news) = news {
            health_checks.push(news.clone());
        }

        let reasoning = LlmReasoner::from_env().map(|reasoner| {
            let reasoner = Arc::new(reasoner);
            health_checks.push(reasoner.clone());
            Arc::new(ReasoningService::new(reasoner))
        });

        let database = Self::build_database_service(&config.providers, &config.rate_limits)?;

        let ids: Arc<dyn IdGenerator> = Arc::new(TimestampIdGenerator);
        let classifier: Arc<dyn TextClassifier> = inference.clone();
        let question_answerer: Arc<dyn QuestionAnswerer> = inference.clone();
        let normalizer: Arc<dyn LanguageNormalizer> = inference;
        // extraction and the AI cross-check call the same classifier
        let classifier_limiter = config.rate_limits.classifier.shared_limiter();

        let claims = Arc::new(ClaimExtractionService::new(
            Arc::clone(&classifier),
            Some(question_answerer),
            Arc::clone(&ids),
            Arc::clone(&classifier_limiter),
            &config.rate_limits,
        ));

        let sources = Arc::new(SourceService::new(
            Arc::new(config.trust),
            news.map(|n| n as Arc<dyn NewsSearch>),
            Arc::new(HttpLivenessProbe::new()),
            reasoning.clone(),
            &config.rate_limits,
        ));

        let credibility = Arc::new(CredibilityService::new(
            Arc::clone(&sources),
            Some(classifier),
            classifier_limiter,
        ));

        let analysis = Arc::new(AnalysisService::new(
            Some(normalizer),
            Arc::clone(&claims),
            Arc::clone(&sources),
            Arc::clone(&credibility),
            database,
            reasoning,
        ));

        Ok(Self {
            analysis,
            claims,
            sources,
            credibility,
            ids,
            health_checks,
        })
    }

    /// Google Fact Check plus every configured endpoint; `None` when no
    /// provider has credentials
    fn build_database_service(
        providers: &[ProviderConfig],
        limits: &RateLimitConfig,
    ) -> Result<Option<Arc<FactCheckDatabaseService>>, AppError> {
        let mut slots: Vec<(Arc<dyn FactCheckProvider>, Quota)> = Vec::new();

        if let Some(google) = ClaimReviewProvider::google_from_env() {
            slots.push((Arc::new(google), limits.fact_check_provider));
        }

        for provider in providers {
            validate_provider(provider)?;
            let quota = provider
                .requests_per_minute
                .map(|rpm| Quota::new(rpm, 60))
                .unwrap_or(limits.fact_check_provider);
            if let Some(configured) = ClaimReviewProvider::from_config(provider) {
                slots.push((Arc::new(configured), quota));
            }
        }

        if slots.is_empty() {
            tracing::warn!("No fact-check database providers configured");
            return Ok(None);
        }

        tracing::info!(providers = slots.len(), "Fact-check databases enabled");
        Ok(Some(Arc::new(FactCheckDatabaseService::new(slots))))
    }
}

fn validate_rate_limits(limits: &RateLimitConfig) -> Result<(), AppError> {
    let quotas = [
        ("classifier", limits.classifier),
        ("question_answering", limits.question_answering),
        ("liveness_probe", limits.liveness_probe),
        ("fact_check_provider", limits.fact_check_provider),
    ];
    for (name, quota) in quotas {
        if quota.requests == 0 || quota.window_secs == 0 {
            return Err(AppError::InvalidConfig(format!(
                "rate limit '{}' needs a non-zero quota and window",
                name
            )));
        }
    }
    Ok(())
}

fn validate_provider(provider: &ProviderConfig) -> Result<(), AppError> {
    if provider.name.trim().is_empty() {
        return Err(AppError::InvalidConfig(
            "fact-check provider without a name".to_string(),
        ));
    }
    if Url::parse(&provider.endpoint).is_err() {
        return Err(AppError::InvalidConfig(format!(
            "fact-check provider '{}' has an invalid endpoint: {}",
            provider.name, provider.endpoint
        )));
    }
    if provider.requests_per_minute == Some(0) {
        return Err(AppError::InvalidConfig(format!(
            "fact-check provider '{}' has a zero request quota",
            provider.name
        )));
    }
    Ok(())
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, endpoint: &str, rpm: Option<usize>) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            api_key_env: None,
            requests_per_minute: rpm,
        }
    }

    #[test]
    fn test_default_rate_limits_are_valid() {
        assert!(validate_rate_limits(&RateLimitConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_quota_rejected() {
        let limits = RateLimitConfig {
            liveness_probe: Quota::new(0, 1),
            ..RateLimitConfig::default()
        };
        assert!(matches!(
            validate_rate_limits(&limits),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_provider_validation() {
        assert!(validate_provider(&provider("snopes", "https://example.org/search", Some(30))).is_ok());
        assert!(validate_provider(&provider(" ", "https://example.org/search", None)).is_err());
        assert!(validate_provider(&provider("snopes", "not a url", None)).is_err());
        assert!(validate_provider(&provider("snopes", "https://example.org/search", Some(0))).is_err());
    }

    #[test]
    fn test_keyless_provider_enables_database() {
        let providers = vec![provider("open_reviews", "https://example.org/claims", None)];
        let database =
            AppState::build_database_service(&providers, &RateLimitConfig::default()).unwrap();
        assert!(database.is_some_and(|db| db.is_available()));
    }
}

//! ClaimReview search providers (Google Fact Check Tools and compatible endpoints)

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::ClaimReview;
use crate::model::config::ProviderConfig;
use crate::service::database::{DatabaseSearchError, FactCheckProvider};

const GOOGLE_FACT_CHECK_URL: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";
const ENV_GOOGLE_FACT_CHECK_API_KEY: &str = "GOOGLE_FACT_CHECK_API_KEY";
const GOOGLE_PROVIDER_NAME: &str = "google_fact_check";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: &str = "10";

#[derive(Debug, Deserialize)]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Vec<ReviewedClaim>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewedClaim {
    #[serde(default)]
    text: String,
    claimant: Option<String>,
    #[serde(default)]
    claim_review: Vec<Review>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Review {
    publisher: Option<Publisher>,
    #[serde(default)]
    url: String,
    review_date: Option<String>,
    #[serde(default)]
    textual_rating: String,
}

#[derive(Debug, Deserialize)]
struct Publisher {
    name: Option<String>,
    site: Option<String>,
}

/// A provider speaking the `claims:search` ClaimReview response format
pub struct ClaimReviewProvider {
    client: Client,
    name: String,
    endpoint: String,
    api_key: Option<String>,
}

impl ClaimReviewProvider {
    pub fn new(name: &str, endpoint: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("credence/0.1")
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            api_key,
        }
    }

    /// Google Fact Check Tools; `None` when `GOOGLE_FACT_CHECK_API_KEY` is unset
    pub fn google_from_env() -> Option<Self> {
        let Some(key) = env::var(ENV_GOOGLE_FACT_CHECK_API_KEY)
            .ok()
            .filter(|k| !k.is_empty())
        else {
            tracing::warn!(
                "{ENV_GOOGLE_FACT_CHECK_API_KEY} not set, Google fact-check search disabled"
            );
            return None;
        };
        Some(Self::new(GOOGLE_PROVIDER_NAME, GOOGLE_FACT_CHECK_URL, Some(key)))
    }

    /// A configured endpoint; a named key variable that is unset disables it
    pub fn from_config(config: &ProviderConfig) -> Option<Self> {
        let api_key = match config.api_key_env {
            Some(ref var) => match env::var(var) {
                Ok(key) if !key.is_empty() => Some(key),
                _ => {
                    tracing::warn!(
                        provider = %config.name,
                        env = %var,
                        "Provider API key not set, provider disabled"
                    );
                    return None;
                }
            },
            None => None,
        };
        Some(Self::new(&config.name, &config.endpoint, api_key))
    }

    fn into_reviews(response: ClaimSearchResponse) -> Vec<ClaimReview> {
        response
            .claims
            .into_iter()
            .flat_map(|claim| {
                let text = claim.text;
                let claimant = claim.claimant;
                claim.claim_review.into_iter().map(move |review| ClaimReview {
                    claim_text: text.clone(),
                    claimant: claimant.clone(),
                    publisher: review
                        .publisher
                        .and_then(|p| p.name.or(p.site))
                        .unwrap_or_else(|| "unknown".to_string()),
                    url: review.url,
                    review_date: review.review_date,
                    textual_rating: review.textual_rating,
                })
            })
            .collect()
    }
}

#[async_trait]
impl FactCheckProvider for ClaimReviewProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<Vec<ClaimReview>, DatabaseSearchError> {
        tracing::debug!(provider = %self.name, query = %query, "Searching fact-check database");

        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("pageSize", PAGE_SIZE)]);
        if let Some(ref key) = self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DatabaseSearchError::RateLimited(self.name.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DatabaseSearchError::ParseError(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        let parsed: ClaimSearchResponse = response.json().await.map_err(|e| {
            DatabaseSearchError::ParseError(format!("Failed to deserialize claims: {}", e))
        })?;

        Ok(Self::into_reviews(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_claim_search_response() {
        let json = r#"{
            "claims": [{
                "text": "The moon landing was staged",
                "claimant": "Viral post",
                "claimDate": "2023-01-02T00:00:00Z",
                "claimReview": [
                    {
                        "publisher": {"name": "PolitiFact", "site": "politifact.com"},
                        "url": "https://www.politifact.com/x",
                        "title": "No, the moon landing was not staged",
                        "reviewDate": "2023-01-03T00:00:00Z",
                        "textualRating": "Pants on Fire",
                        "languageCode": "en"
                    },
                    {
                        "publisher": {"site": "fullfact.org"},
                        "url": "https://fullfact.org/y",
                        "textualRating": "False"
                    }
                ]
            }]
        }"#;

        let parsed: ClaimSearchResponse = serde_json::from_str(json).unwrap();
        let reviews = ClaimReviewProvider::into_reviews(parsed);

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].publisher, "PolitiFact");
        assert_eq!(reviews[0].claimant.as_deref(), Some("Viral post"));
        assert_eq!(reviews[0].textual_rating, "Pants on Fire");
        assert_eq!(reviews[1].publisher, "fullfact.org");
        assert_eq!(reviews[1].claim_text, "The moon landing was staged");
        assert!(reviews[1].review_date.is_none());
    }

    #[test]
    fn test_empty_response() {
        let parsed: ClaimSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(ClaimReviewProvider::into_reviews(parsed).is_empty());
    }

    #[test]
    fn test_config_with_missing_key_is_disabled() {
        let config = ProviderConfig {
            name: "regional".to_string(),
            endpoint: "https://factcheck.example/search".to_string(),
            api_key_env: Some("CREDENCE_TEST_UNSET_PROVIDER_KEY".to_string()),
            requests_per_minute: None,
        };
        assert!(ClaimReviewProvider::from_config(&config).is_none());

        let open = ProviderConfig {
            api_key_env: None,
            ..config
        };
        let provider = ClaimReviewProvider::from_config(&open).unwrap();
        assert_eq!(provider.name(), "regional");
    }

    #[tokio::test]
    #[ignore] // Requires network access and GOOGLE_FACT_CHECK_API_KEY
    async fn test_google_search() {
        let provider = ClaimReviewProvider::google_from_env().unwrap();
        let reviews = provider.search("moon landing").await.unwrap();
        assert!(!reviews.is_empty());
    }
}

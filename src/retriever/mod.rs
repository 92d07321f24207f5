//! Web-facing evidence collaborators: news search and URL liveness probing

mod news;
mod probe;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use crate::model::config::normalize_domain;

pub use news::NewsApiRetriever;
pub use probe::HttpLivenessProbe;

#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited")]
    RateLimited,
}

/// One search result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub url: Url,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Web or news search by free-text query
#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, RetrieverError>;
}

/// Lightweight reachability check of a URL, returning the HTTP status
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn probe(&self, url: &Url) -> Result<u16, RetrieverError>;
}

/// Extract the bare domain (no `www.`) from a URL
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(normalize_domain)
}

/// Parse the date formats news APIs commonly return
pub(crate) fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

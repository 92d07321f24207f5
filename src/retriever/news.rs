//! NewsAPI-compatible news search

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{NewsSearch, RetrieverError, SearchHit, parse_date};
use crate::service::health::HealthCheck;

const NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
const ENV_NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";
const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: &str = "5";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    url: String,
    title: Option<String>,
    published_at: Option<String>,
    author: Option<String>,
    description: Option<String>,
}

/// Retriever for the NewsAPI `/everything` endpoint
pub struct NewsApiRetriever {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiRetriever {
    /// Build from `NEWS_API_KEY` / `NEWS_API_BASE_URL`; `None` when no key is configured
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(ENV_NEWS_API_KEY).ok().filter(|k| !k.is_empty())?;
        let base_url =
            env::var(ENV_NEWS_API_BASE_URL).unwrap_or_else(|_| NEWS_API_BASE_URL.to_string());

        Some(Self {
            client: Client::builder()
                .user_agent("credence/0.1")
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            api_key,
        })
    }

    fn into_hit(article: Article) -> Option<SearchHit> {
        let url = Url::parse(&article.url).ok()?;
        let title = article.title.filter(|t| !t.trim().is_empty())?;
        Some(SearchHit {
            url,
            title,
            published_at: article.published_at.as_deref().and_then(parse_date),
            author: article.author,
            description: article.description,
        })
    }
}

#[async_trait]
impl NewsSearch for NewsApiRetriever {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, RetrieverError> {
        let url = format!("{}/everything", self.base_url.trim_end_matches('/'));

        tracing::debug!(query = %query, "Searching news");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("sortBy", "relevancy"),
                ("language", "en"),
                ("pageSize", PAGE_SIZE),
            ])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(query = %query, "News search rate limited");
            return Err(RetrieverError::RateLimited);
        }

        if !response.status().is_success() {
            return Err(RetrieverError::ParseError(format!(
                "HTTP {}: {}",
                response.status(),
                url
            )));
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| RetrieverError::ParseError(e.to_string()))?;

        let hits: Vec<SearchHit> = body.articles.into_iter().filter_map(Self::into_hit).collect();

        tracing::debug!(query = %query, hits = hits.len(), "News search complete");

        Ok(hits)
    }
}

#[async_trait]
impl HealthCheck for NewsApiRetriever {
    fn service_name(&self) -> &str {
        "news_search"
    }

    async fn check(&self) -> Result<(), String> {
        self.search("news").await.map(|_| ()).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_parsing_skips_incomplete() {
        let json = r#"{
            "status": "ok",
            "articles": [
                {"url": "https://www.reuters.com/a", "title": "Study confirms result",
                 "publishedAt": "2024-05-01T10:00:00Z", "author": "Jane Doe", "description": "d"},
                {"url": "not a url", "title": "Broken"},
                {"url": "https://apnews.com/b", "title": null}
            ]
        }"#;
        let body: EverythingResponse = serde_json::from_str(json).unwrap();
        let hits: Vec<SearchHit> = body
            .articles
            .into_iter()
            .filter_map(NewsApiRetriever::into_hit)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Study confirms result");
        assert!(hits[0].published_at.is_some());
        assert_eq!(hits[0].author.as_deref(), Some("Jane Doe"));
    }
}

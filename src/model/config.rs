use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::service::rate_limit::{RateLimiter, SharedRateLimiter};

const ENV_CONFIG_PATH: &str = "CREDENCE_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Placeholder replaced by the url-encoded topic in curated search URLs
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Domain filtering applied to every candidate source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainFilter {
    /// Allowed domains (whitelist). If empty, all domains are allowed.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Denied domains (blacklist). Applied after allow list.
    #[serde(default)]
    pub deny: Vec<String>,
}

impl DomainFilter {
    /// Check if a URL is allowed based on the allow/deny lists
    pub fn is_url_allowed(&self, url: &Url) -> bool {
        let host = match url.host_str() {
            Some(h) => h.to_lowercase(),
            None => return false,
        };

        if self.deny.iter().any(|d| host.contains(&d.to_lowercase())) {
            return false;
        }

        if self.allow.is_empty() {
            return true;
        }

        self.allow.iter().any(|a| host.contains(&a.to_lowercase()))
    }
}

/// A curated site that sources are constructed for deterministically
#[derive(Debug, Clone, Deserialize)]
pub struct CuratedSite {
    pub name: String,
    pub domain: String,
    /// Search URL template containing `{query}`
    pub search_url: String,
    pub reliability: f64,
    #[serde(default = "default_curated_relevance")]
    pub relevance: f64,
}

fn default_curated_relevance() -> f64 {
    0.8
}

impl CuratedSite {
    fn new(name: &str, domain: &str, search_url: &str, reliability: f64, relevance: f64) -> Self {
        Self {
            name: name.to_string(),
            domain: domain.to_string(),
            search_url: search_url.to_string(),
            reliability,
            relevance,
        }
    }

    /// Build the search URL for a topic
    pub fn search_url_for(&self, topic: &str) -> Option<Url> {
        let encoded = urlencoding::encode(topic);
        Url::parse(&self.search_url.replace(QUERY_PLACEHOLDER, &encoded)).ok()
    }
}

/// Curated trust data. Immutable once loaded; shared by the source generator
/// and the scorer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Domain (without `www.`) to static reliability score
    pub domain_reliability: HashMap<String, f64>,
    /// Reliability of news domains missing from the table
    pub default_news_reliability: f64,
    pub fact_check_sites: Vec<CuratedSite>,
    pub academic_sources: Vec<CuratedSite>,
    /// Topics containing any of these emit academic sources
    pub health_keywords: Vec<String>,
    /// How many extracted topics drive candidate gathering
    pub search_topics: usize,
    pub filter: DomainFilter,
}

impl Default for TrustConfig {
    fn default() -> Self {
        let domain_reliability = [
            ("reuters.com", 0.95),
            ("apnews.com", 0.95),
            ("bbc.com", 0.9),
            ("bbc.co.uk", 0.9),
            ("npr.org", 0.9),
            ("nature.com", 0.95),
            ("science.org", 0.95),
            ("who.int", 0.95),
            ("cdc.gov", 0.95),
            ("nih.gov", 0.95),
            ("nytimes.com", 0.85),
            ("washingtonpost.com", 0.85),
            ("theguardian.com", 0.85),
            ("wsj.com", 0.85),
            ("economist.com", 0.85),
            ("bloomberg.com", 0.85),
            ("cnn.com", 0.75),
            ("foxnews.com", 0.7),
            ("wikipedia.org", 0.75),
            ("snopes.com", 0.9),
            ("factcheck.org", 0.95),
            ("politifact.com", 0.9),
            ("fullfact.org", 0.85),
        ]
        .into_iter()
        .map(|(d, r)| (d.to_string(), r))
        .collect();

        Self {
            domain_reliability,
            default_news_reliability: 0.85,
            fact_check_sites: vec![
                CuratedSite::new(
                    "Snopes",
                    "snopes.com",
                    "https://www.snopes.com/search/?q={query}",
                    0.9,
                    0.8,
                ),
                CuratedSite::new(
                    "FactCheck.org",
                    "factcheck.org",
                    "https://www.factcheck.org/search/?q={query}",
                    0.95,
                    0.8,
                ),
                CuratedSite::new(
                    "PolitiFact",
                    "politifact.com",
                    "https://www.politifact.com/search/?q={query}",
                    0.9,
                    0.8,
                ),
            ],
            academic_sources: vec![CuratedSite::new(
                "PubMed",
                "pubmed.ncbi.nlm.nih.gov",
                "https://pubmed.ncbi.nlm.nih.gov/?term={query}",
                0.95,
                0.75,
            )],
            health_keywords: [
                "health", "medical", "medicine", "disease", "vaccine", "virus", "covid",
                "cancer", "drug", "treatment", "clinical", "patient", "hospital", "infection",
                "diet", "nutrition",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            search_topics: 3,
            filter: DomainFilter::default(),
        }
    }
}

impl TrustConfig {
    /// Reliability for a domain, matching the table by suffix so that
    /// subdomains inherit their parent's score
    pub fn reliability_for(&self, domain: &str) -> f64 {
        let domain = normalize_domain(domain);
        self.domain_reliability
            .iter()
            .filter(|(known, _)| domain == **known || domain.ends_with(&format!(".{}", known)))
            .max_by_key(|(known, _)| known.len())
            .map(|(_, score)| score.clamp(0.0, 1.0))
            .unwrap_or(self.default_news_reliability)
    }

    pub fn is_health_topic(&self, topic: &str) -> bool {
        let topic = topic.to_lowercase();
        self.health_keywords
            .iter()
            .any(|k| topic.contains(&k.to_lowercase()))
    }
}

/// Strip a leading `www.` and lowercase
pub fn normalize_domain(domain: &str) -> String {
    let lower = domain.trim().to_lowercase();
    lower
        .strip_prefix("www.")
        .map(str::to_string)
        .unwrap_or(lower)
}

/// Request quota over a sliding window
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Quota {
    pub requests: usize,
    pub window_secs: u64,
}

impl Quota {
    pub const fn new(requests: usize, window_secs: u64) -> Self {
        Self {
            requests,
            window_secs,
        }
    }

    pub fn limiter(&self) -> RateLimiter {
        RateLimiter::new(self.requests, Duration::from_secs(self.window_secs))
    }

    pub fn shared_limiter(&self) -> SharedRateLimiter {
        Arc::new(tokio::sync::Mutex::new(self.limiter()))
    }
}

/// Per-collaborator throttling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub classifier: Quota,
    pub question_answering: Quota,
    pub liveness_probe: Quota,
    pub fact_check_provider: Quota,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            classifier: Quota::new(10, 1),
            question_answering: Quota::new(5, 1),
            liveness_probe: Quota::new(2, 1),
            fact_check_provider: Quota::new(60, 60),
        }
    }
}

/// An additional ClaimReview-compatible fact-check endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    /// Search endpoint; the query is passed as the `query` parameter
    pub endpoint: String,
    /// Environment variable holding the API key, passed as `key`
    pub api_key_env: Option<String>,
    pub requests_per_minute: Option<usize>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub trust: Option<TrustConfig>,
    #[serde(default)]
    pub rate_limits: Option<RateLimitConfig>,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub trust: TrustConfig,
    pub rate_limits: RateLimitConfig,
    pub providers: Vec<ProviderConfig>,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trust: TrustConfig::default(),
            rate_limits: RateLimitConfig::default(),
            providers: Vec::new(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            trust: file.trust.unwrap_or_default(),
            rate_limits: file.rate_limits.unwrap_or_default(),
            providers: file.providers,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents, path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(contents: &str, path: &Path) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! Source generation and verification
//!
//! Builds a ranked pool of evidence sources for a text: curated fact-check
//! search pages, news search results and, for health topics, academic indexes.
//! Candidates are deduplicated, probed for liveness one at a time and ranked
//! by reliability times relevance.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::model::config::{RateLimitConfig, TrustConfig};
use crate::model::{Source, SourceOptions, SourceType, SourceVerification};
use crate::retriever::{LivenessProbe, NewsSearch};
use crate::service::rate_limit::RateLimiter;
use crate::service::reasoning::ReasoningService;
use crate::service::sources::evidence::{curated_sources, news_source};
use crate::service::sources::topics::term_frequency_topics;

pub mod evidence;
pub mod topics;

/// Service for generating and verifying evidence sources
pub struct SourceService {
    trust: Arc<TrustConfig>,
    news: Option<Arc<dyn NewsSearch>>,
    probe: Arc<dyn LivenessProbe>,
    reasoning: Option<Arc<ReasoningService>>,
    probe_limiter: Mutex<RateLimiter>,
}

impl SourceService {
    pub fn new(
        trust: Arc<TrustConfig>,
        news: Option<Arc<dyn NewsSearch>>,
        probe: Arc<dyn LivenessProbe>,
        reasoning: Option<Arc<ReasoningService>>,
        limits: &RateLimitConfig,
    ) -> Self {
        tracing::info!(
            news_search = news.is_some(),
            reasoning_topics = reasoning.is_some(),
            fact_check_sites = trust.fact_check_sites.len(),
            "Source service initialized"
        );
        Self {
            trust,
            news,
            probe,
            reasoning,
            probe_limiter: Mutex::new(limits.liveness_probe.limiter()),
        }
    }

    /// Ranked, verified sources for `text`, capped at `max_sources`
    ///
    /// Never fails: gathering or probe errors only shrink the result.
    pub async fn generate_sources(&self, text: &str, options: &SourceOptions) -> Vec<Source> {
        let start_time = Instant::now();

        let mut topics = self.topics(text).await;
        topics.truncate(self.trust.search_topics.max(1));

        let (curated, news, academic) = tokio::join!(
            async { self.fact_check_candidates(&topics) },
            self.news_candidates(&topics),
            async { self.academic_candidates(&topics) },
        );

        let gathered = curated.len() + news.len() + academic.len();
        let candidates = self.dedup_and_filter(curated.into_iter().chain(news).chain(academic));
        let eligible: Vec<Source> = candidates
            .into_iter()
            .filter(|s| s.reliability >= options.min_reliability)
            .collect();

        let mut sources = if options.verify_urls {
            self.verify(eligible).await
        } else {
            eligible
        };

        sources.sort_by(|a, b| b.rank_score().total_cmp(&a.rank_score()));
        sources.truncate(options.max_sources);

        tracing::info!(
            topics = topics.len(),
            gathered = gathered,
            returned = sources.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Source generation complete"
        );

        sources
    }

    async fn topics(&self, text: &str) -> Vec<String> {
        if let Some(ref reasoning) = self.reasoning
            && let Some(topics) = reasoning.topics(text).await
        {
            return topics;
        }
        tracing::debug!("Using term-frequency topics");
        term_frequency_topics(text)
    }

    fn fact_check_candidates(&self, topics: &[String]) -> Vec<Source> {
        self.trust
            .fact_check_sites
            .iter()
            .flat_map(|site| curated_sources(site, topics, SourceType::FactCheck))
            .collect()
    }

    fn academic_candidates(&self, topics: &[String]) -> Vec<Source> {
        let health_topics: Vec<String> = topics
            .iter()
            .filter(|t| self.trust.is_health_topic(t))
            .cloned()
            .collect();
        if health_topics.is_empty() {
            return Vec::new();
        }
        self.trust
            .academic_sources
            .iter()
            .flat_map(|site| curated_sources(site, &health_topics, SourceType::Academic))
            .collect()
    }

    async fn news_candidates(&self, topics: &[String]) -> Vec<Source> {
        let Some(ref news) = self.news else {
            return Vec::new();
        };

        let results = join_all(topics.iter().map(|topic| async move {
            (topic, news.search(topic).await)
        }))
        .await;

        let mut sources = Vec::new();
        for (topic, result) in results {
            match result {
                Ok(hits) => sources.extend(
                    hits.into_iter()
                        .filter_map(|hit| news_source(hit, topic, &self.trust)),
                ),
                Err(e) => {
                    tracing::warn!(topic = %topic, error = %e, "News search failed");
                }
            }
        }
        sources
    }

    /// Drop filtered domains, then keep the first source per (domain, title)
    fn dedup_and_filter(&self, candidates: impl Iterator<Item = Source>) -> Vec<Source> {
        let mut seen = HashSet::new();
        candidates
            .filter(|s| self.trust.filter.is_url_allowed(&s.url))
            .filter(|s| seen.insert(s.dedup_key()))
            .collect()
    }

    /// Probe each source in turn; only verified sources are kept
    async fn verify(&self, sources: Vec<Source>) -> Vec<Source> {
        let mut verified = Vec::with_capacity(sources.len());

        for mut source in sources {
            self.probe_limiter.lock().await.acquire().await;

            source.verification_status = match self.probe.probe(&source.url).await {
                Ok(status) if (200..400).contains(&status) => SourceVerification::Verified,
                Ok(status) => {
                    tracing::debug!(url = %source.url, status = status, "Source probe rejected");
                    SourceVerification::Failed
                }
                Err(e) => {
                    tracing::debug!(url = %source.url, error = %e, "Source probe failed");
                    SourceVerification::Failed
                }
            };

            if source.verification_status == SourceVerification::Verified {
                verified.push(source);
            }
        }

        verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{FakeNews, FakeProbe, FakeReasoner, test_limits};

    const TEXT: &str = "Health officials say the new vaccine reduced hospital visits by half in the trial.";

    fn service(news: Option<FakeNews>, probe: FakeProbe, reasoner: Option<FakeReasoner>) -> SourceService {
        SourceService::new(
            Arc::new(TrustConfig::default()),
            news.map(|n| Arc::new(n) as Arc<dyn NewsSearch>),
            Arc::new(probe),
            reasoner.map(|r| Arc::new(ReasoningService::new(Arc::new(r)))),
            &test_limits(),
        )
    }

    fn options(max_sources: usize) -> SourceOptions {
        SourceOptions {
            max_sources,
            ..SourceOptions::default()
        }
    }

    #[tokio::test]
    async fn test_ranked_by_reliability_times_relevance() {
        let reasoner = FakeReasoner::scoring(0.5).with_topics(&["vaccine trial"]);
        let svc = service(None, FakeProbe::always(200), Some(reasoner));
        let sources = svc.generate_sources(TEXT, &options(10)).await;

        // FactCheck.org 0.95*0.8 ranks above Snopes/PolitiFact 0.9*0.8 and PubMed 0.95*0.75
        assert_eq!(sources[0].domain, "factcheck.org");
        assert_eq!(sources.len(), 4);
        assert!(sources.iter().any(|s| s.source_type == SourceType::Academic));
        assert!(sources
            .iter()
            .all(|s| s.verification_status == SourceVerification::Verified));
        assert!(sources.windows(2).all(|w| w[0].rank_score() >= w[1].rank_score()));
    }

    #[tokio::test]
    async fn test_caps_and_reliability_floor() {
        let reasoner = FakeReasoner::scoring(0.5).with_topics(&["election"]);
        let news = FakeNews::new().with_hit("https://www.foxnews.com/x", "Election story", None);
        let svc = service(Some(news), FakeProbe::always(200), Some(reasoner));

        let sources = svc.generate_sources(TEXT, &options(2)).await;
        assert_eq!(sources.len(), 2);

        let sources = svc.generate_sources(TEXT, &options(10)).await;
        assert!(sources.iter().all(|s| s.reliability >= 0.7));
        assert!(sources.iter().any(|s| s.domain == "foxnews.com"));

        let strict = SourceOptions {
            min_reliability: 0.92,
            max_sources: 10,
            verify_urls: true,
        };
        let sources = svc.generate_sources(TEXT, &strict).await;
        assert!(sources.iter().all(|s| s.domain == "factcheck.org"));
    }

    #[tokio::test]
    async fn test_failed_probes_drop_sources() {
        let reasoner = FakeReasoner::scoring(0.5).with_topics(&["election"]);
        let probe = FakeProbe::always(200).with_status("factcheck.org", 404);
        let svc = service(None, probe, Some(reasoner));
        let sources = svc.generate_sources(TEXT, &options(10)).await;
        assert_eq!(sources.len(), 2);
        assert!(sources.iter().all(|s| s.domain != "factcheck.org"));
    }

    #[tokio::test]
    async fn test_redirect_counts_as_verified() {
        let reasoner = FakeReasoner::scoring(0.5).with_topics(&["election"]);
        let svc = service(None, FakeProbe::always(301), Some(reasoner));
        assert_eq!(svc.generate_sources(TEXT, &options(10)).await.len(), 3);
    }

    #[tokio::test]
    async fn test_all_strategies_failing_yields_empty() {
        let reasoner = FakeReasoner::failing();
        let svc = service(Some(FakeNews::failing()), FakeProbe::failing(), Some(reasoner));
        assert!(svc.generate_sources(TEXT, &options(3)).await.is_empty());
    }

    #[tokio::test]
    async fn test_skipping_verification_keeps_unverified() {
        let reasoner = FakeReasoner::scoring(0.5).with_topics(&["election"]);
        let svc = service(None, FakeProbe::failing(), Some(reasoner));
        let opts = SourceOptions {
            verify_urls: false,
            ..options(10)
        };
        let sources = svc.generate_sources(TEXT, &opts).await;
        assert_eq!(sources.len(), 3);
        assert!(sources
            .iter()
            .all(|s| s.verification_status == SourceVerification::Unverified));
    }

    #[tokio::test]
    async fn test_duplicate_news_hits_collapse() {
        let reasoner = FakeReasoner::scoring(0.5).with_topics(&["election", "ballots"]);
        let news = FakeNews::new().with_hit("https://apnews.com/a", "Same headline", None);
        let svc = service(Some(news), FakeProbe::always(200), Some(reasoner));
        let sources = svc.generate_sources(TEXT, &options(20)).await;
        assert_eq!(sources.iter().filter(|s| s.domain == "apnews.com").count(), 1);
    }

    #[tokio::test]
    async fn test_term_frequency_fallback_without_reasoning() {
        let svc = service(None, FakeProbe::always(200), None);
        let sources = svc.generate_sources(TEXT, &options(20)).await;
        // three fact-check sites times three topics, plus PubMed for "health"
        assert_eq!(
            sources
                .iter()
                .filter(|s| s.source_type == SourceType::FactCheck)
                .count(),
            9
        );
        assert!(sources.iter().any(|s| s.source_type == SourceType::Academic));
    }
}

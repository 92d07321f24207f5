//! Candidate construction from curated sites and search hits

use crate::model::config::{CuratedSite, TrustConfig, normalize_domain};
use crate::model::{Source, SourceStance, SourceType, SourceVerification};
use crate::retriever::{SearchHit, extract_domain};

const CONTRADICTING_MARKERS: &[&str] = &[
    "false",
    "fake",
    "hoax",
    "debunk",
    "myth",
    "misleading",
    "no evidence",
    "not true",
    "disputed",
];

const SUPPORTING_MARKERS: &[&str] = &["confirm", "verified", "study finds", "evidence shows"];

/// One search-URL source per topic for a curated site
pub fn curated_sources(site: &CuratedSite, topics: &[String], source_type: SourceType) -> Vec<Source> {
    topics
        .iter()
        .filter_map(|topic| {
            let url = site.search_url_for(topic)?;
            Some(Source {
                url,
                title: format!("{} search: {}", site.name, topic),
                domain: normalize_domain(&site.domain),
                reliability: site.reliability.clamp(0.0, 1.0),
                publish_date: None,
                author: None,
                relevance_score: site.relevance.clamp(0.0, 1.0),
                fact_check_result: SourceStance::Neutral,
                source_type,
                verification_status: SourceVerification::Unverified,
            })
        })
        .collect()
}

/// Map a news hit to a source, scored against the topic it was found for
pub fn news_source(hit: SearchHit, topic: &str, trust: &TrustConfig) -> Option<Source> {
    let domain = extract_domain(&hit.url)?;
    let haystack = format!(
        "{} {}",
        hit.title,
        hit.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    Some(Source {
        reliability: trust.reliability_for(&domain),
        relevance_score: relevance(topic, &haystack),
        fact_check_result: stance(&haystack),
        source_type: classify_domain(&domain),
        domain,
        url: hit.url,
        title: hit.title,
        publish_date: hit.published_at,
        author: hit.author,
        verification_status: SourceVerification::Unverified,
    })
}

/// 0.5 plus half the share of topic words present in the text
fn relevance(topic: &str, haystack: &str) -> f64 {
    let words: Vec<String> = topic
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return 0.5;
    }
    let found = words.iter().filter(|w| haystack.contains(w.as_str())).count();
    0.5 + 0.5 * (found as f64 / words.len() as f64)
}

fn stance(haystack: &str) -> SourceStance {
    if haystack.trim().is_empty() {
        return SourceStance::InsufficientEvidence;
    }
    if CONTRADICTING_MARKERS.iter().any(|m| haystack.contains(m)) {
        return SourceStance::Contradicts;
    }
    if SUPPORTING_MARKERS.iter().any(|m| haystack.contains(m)) {
        return SourceStance::Supports;
    }
    SourceStance::Neutral
}

fn classify_domain(domain: &str) -> SourceType {
    if domain.ends_with(".gov") || domain.contains(".gov.") {
        SourceType::Government
    } else if domain.ends_with("wikipedia.org") {
        SourceType::Reference
    } else {
        SourceType::News
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn hit(url: &str, title: &str, description: Option<&str>) -> SearchHit {
        SearchHit {
            url: Url::parse(url).unwrap(),
            title: title.to_string(),
            published_at: None,
            author: None,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_curated_sources_per_topic() {
        let trust = TrustConfig::default();
        let site = &trust.fact_check_sites[0];
        let topics = vec!["moon landing".to_string(), "vaccines".to_string()];
        let sources = curated_sources(site, &topics, SourceType::FactCheck);
        assert_eq!(sources.len(), 2);
        assert!(sources[0].url.as_str().contains("moon%20landing"));
        assert_eq!(sources[0].fact_check_result, SourceStance::Neutral);
        assert_eq!(sources[0].relevance_score, 0.8);
    }

    #[test]
    fn test_news_source_scoring() {
        let trust = TrustConfig::default();
        let source = news_source(
            hit(
                "https://www.reuters.com/a",
                "Fact check: moon landing hoax claims resurface",
                None,
            ),
            "moon landing",
            &trust,
        )
        .unwrap();
        assert_eq!(source.domain, "reuters.com");
        assert_eq!(source.reliability, 0.95);
        assert_eq!(source.relevance_score, 1.0);
        assert_eq!(source.fact_check_result, SourceStance::Contradicts);
        assert_eq!(source.source_type, SourceType::News);
    }

    #[test]
    fn test_news_source_unknown_domain_and_support() {
        let trust = TrustConfig::default();
        let source = news_source(
            hit(
                "https://example-news.net/b",
                "Study finds link",
                Some("Researchers confirm the moon effect"),
            ),
            "tides",
            &trust,
        )
        .unwrap();
        assert_eq!(source.reliability, trust.default_news_reliability);
        assert_eq!(source.relevance_score, 0.5);
        assert_eq!(source.fact_check_result, SourceStance::Supports);
    }

    #[test]
    fn test_classify_domain() {
        assert_eq!(classify_domain("cdc.gov"), SourceType::Government);
        assert_eq!(classify_domain("en.wikipedia.org"), SourceType::Reference);
        assert_eq!(classify_domain("bbc.co.uk"), SourceType::News);
    }

    #[test]
    fn test_empty_text_is_insufficient() {
        assert_eq!(stance("  "), SourceStance::InsufficientEvidence);
    }
}

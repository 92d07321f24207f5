//! Deterministic in-memory collaborators for tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use url::Url;

use crate::model::config::{Quota, RateLimitConfig};
use crate::model::{ClaimReview, ExtractedClaimAnalysis, ExtractedTopics, RiskLevel};
use crate::retriever::{LivenessProbe, NewsSearch, RetrieverError, SearchHit};
use crate::service::database::{DatabaseSearchError, FactCheckProvider};
use crate::service::ids::IdGenerator;
use crate::service::inference::{
    Classification, InferenceError, LanguageNormalizer, QaAnswer, QuestionAnswerer,
    TextClassifier,
};
use crate::service::reasoning::{ClaimReasoner, ReasoningError};

/// Quotas high enough that tests never wait
pub fn test_limits() -> RateLimitConfig {
    let quota = Quota::new(10_000, 1);
    RateLimitConfig {
        classifier: quota,
        question_answering: quota,
        liveness_probe: quota,
        fact_check_provider: quota,
    }
}

/// Ids `claim_1`, `claim_2`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("claim_{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Classifier answering by case-insensitive substring rules
pub struct FakeClassifier {
    default: (String, f64),
    rules: Vec<(String, String, f64)>,
    failing: Vec<String>,
}

impl FakeClassifier {
    pub fn new(label: &str, score: f64) -> Self {
        Self {
            default: (label.to_string(), score),
            rules: Vec::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_rule(mut self, pattern: &str, label: &str, score: f64) -> Self {
        self.rules
            .push((pattern.to_lowercase(), label.to_string(), score));
        self
    }

    pub fn failing_on(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_lowercase());
        self
    }
}

#[async_trait]
impl TextClassifier for FakeClassifier {
    async fn classify(&self, text: &str, _labels: &[&str]) -> Result<Classification, InferenceError> {
        let lower = text.to_lowercase();
        if self.failing.iter().any(|p| lower.contains(p)) {
            return Err(InferenceError::ParseError("classifier unavailable".to_string()));
        }
        let (label, score) = self
            .rules
            .iter()
            .find(|(pattern, _, _)| lower.contains(pattern))
            .map(|(_, label, score)| (label.clone(), *score))
            .unwrap_or_else(|| self.default.clone());
        Ok(Classification {
            top_label: label,
            score,
        })
    }
}

/// QA answering each question whose text starts with a configured prefix
pub struct FakeQuestionAnswerer {
    answers: Vec<(String, String, f64, usize)>,
}

impl FakeQuestionAnswerer {
    pub fn new(answers: Vec<(&str, &str, f64, usize)>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|(prefix, answer, score, start)| {
                    (prefix.to_string(), answer.to_string(), score, start)
                })
                .collect(),
        }
    }
}

#[async_trait]
impl QuestionAnswerer for FakeQuestionAnswerer {
    async fn answer(&self, question: &str, _context: &str) -> Result<QaAnswer, InferenceError> {
        self.answers
            .iter()
            .find(|(prefix, _, _, _)| question.starts_with(prefix.as_str()))
            .map(|(_, answer, score, start)| QaAnswer {
                answer: answer.clone(),
                score: *score,
                start: *start,
                end: start + answer.chars().count(),
            })
            .ok_or_else(|| InferenceError::ParseError("no answer".to_string()))
    }
}

/// News search returning the same hits for every query
#[derive(Default)]
pub struct FakeNews {
    hits: Vec<SearchHit>,
    fail: bool,
}

impl FakeNews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
        }
    }

    pub fn with_hit(mut self, url: &str, title: &str, description: Option<&str>) -> Self {
        self.hits.push(SearchHit {
            url: Url::parse(url).expect("valid test url"),
            title: title.to_string(),
            published_at: None,
            author: None,
            description: description.map(str::to_string),
        });
        self
    }
}

#[async_trait]
impl NewsSearch for FakeNews {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, RetrieverError> {
        if self.fail {
            return Err(RetrieverError::RateLimited);
        }
        Ok(self.hits.clone())
    }
}

/// Probe returning a fixed status, overridable per host substring
pub struct FakeProbe {
    default: Option<u16>,
    overrides: Vec<(String, u16)>,
}

impl FakeProbe {
    pub fn always(status: u16) -> Self {
        Self {
            default: Some(status),
            overrides: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            default: None,
            overrides: Vec::new(),
        }
    }

    pub fn with_status(mut self, host: &str, status: u16) -> Self {
        self.overrides.push((host.to_string(), status));
        self
    }
}

#[async_trait]
impl LivenessProbe for FakeProbe {
    async fn probe(&self, url: &Url) -> Result<u16, RetrieverError> {
        let host = url.host_str().unwrap_or_default();
        if let Some((_, status)) = self.overrides.iter().find(|(h, _)| host.contains(h.as_str())) {
            return Ok(*status);
        }
        self.default
            .ok_or_else(|| RetrieverError::ParseError("probe timed out".to_string()))
    }
}

/// Reasoner with a fixed credibility score and topic list
pub struct FakeReasoner {
    score: f64,
    topics: Vec<String>,
    fail: bool,
}

impl FakeReasoner {
    pub fn scoring(score: f64) -> Self {
        Self {
            score,
            topics: Vec::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            score: 0.5,
            topics: Vec::new(),
            fail: true,
        }
    }

    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }
}

#[async_trait]
impl ClaimReasoner for FakeReasoner {
    async fn extract_topics(&self, _text: &str) -> Result<ExtractedTopics, ReasoningError> {
        if self.fail {
            return Err(ReasoningError::ExtractionFailed("model unavailable".to_string()));
        }
        Ok(ExtractedTopics {
            topics: self.topics.clone(),
        })
    }

    async fn analyze_claim(&self, _claim: &str) -> Result<ExtractedClaimAnalysis, ReasoningError> {
        if self.fail {
            return Err(ReasoningError::ExtractionFailed("model unavailable".to_string()));
        }
        let risk = match RiskLevel::from_score(self.score.clamp(0.0, 1.0)) {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        Ok(ExtractedClaimAnalysis {
            is_factual: true,
            credibility_score: self.score,
            risk_level: risk.to_string(),
            category: "factual".to_string(),
            reasoning: "Deterministic test analysis".to_string(),
            confidence: 0.8,
            suggested_sources: Vec::new(),
        })
    }
}

/// Fact-check provider returning one review per configured rating
pub struct FakeProvider {
    name: String,
    ratings: Vec<String>,
    fail: bool,
}

impl FakeProvider {
    pub fn rating(name: &str, ratings: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            ratings: ratings.iter().map(|r| r.to_string()).collect(),
            fail: false,
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ratings: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl FactCheckProvider for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<Vec<ClaimReview>, DatabaseSearchError> {
        if self.fail {
            return Err(DatabaseSearchError::ParseError("provider unavailable".to_string()));
        }
        Ok(self
            .ratings
            .iter()
            .map(|rating| ClaimReview {
                claim_text: query.to_string(),
                claimant: None,
                publisher: self.name.clone(),
                url: format!("https://{}.example/review", self.name),
                review_date: None,
                textual_rating: rating.clone(),
            })
            .collect())
    }
}

/// Translator returning fixed text
pub struct FakeNormalizer {
    translation: Option<String>,
}

impl FakeNormalizer {
    pub fn returning(translation: &str) -> Self {
        Self {
            translation: Some(translation.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { translation: None }
    }
}

#[async_trait]
impl LanguageNormalizer for FakeNormalizer {
    async fn translate_to_english(
        &self,
        _text: &str,
        source_language: &str,
    ) -> Result<String, InferenceError> {
        self.translation
            .clone()
            .ok_or_else(|| InferenceError::UnsupportedLanguage(source_language.to_string()))
    }
}

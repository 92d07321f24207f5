//! Credibility factor computation, weighting and verdicts
//!
//! Pure functions of the selected sources and the evaluation time, so the
//! same evidence always yields the same assessment.

use chrono::{DateTime, Utc};

use crate::model::{
    CredibilityAssessment, CredibilityFactors, RiskLevel, Source, SourceStance, Verdict,
};
use crate::service::assessment::error::AssessmentError;

/// Fixed author credibility until authors are scored independently
pub const AUTHOR_CREDIBILITY: f64 = 0.7;

/// Factor value used when there are no sources to measure
const NO_SOURCES_DEFAULT: f64 = 0.3;

/// Recency of a source without a publish date
const UNDATED_RECENCY: f64 = 0.5;

const MIN_RECENCY: f64 = 0.3;

const WEIGHT_SOURCE_RELIABILITY: f64 = 0.30;
const WEIGHT_EVIDENCE_STRENGTH: f64 = 0.25;
const WEIGHT_CONSENSUS: f64 = 0.20;
const WEIGHT_RECENCY: f64 = 0.10;
const WEIGHT_AUTHOR: f64 = 0.15;

/// Labels offered to the zero-shot classifier for the AI cross-check
pub const AI_LABELS: [&str; 5] = ["factual", "misleading", "false", "opinion", "unverifiable"];

/// Supporting and contradicting source counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StanceCounts {
    pub supporting: usize,
    pub contradicting: usize,
    pub total: usize,
}

impl StanceCounts {
    pub fn from_sources(sources: &[Source]) -> Self {
        Self {
            supporting: count_stance(sources, SourceStance::Supports),
            contradicting: count_stance(sources, SourceStance::Contradicts),
            total: sources.len(),
        }
    }
}

fn count_stance(sources: &[Source], stance: SourceStance) -> usize {
    sources
        .iter()
        .filter(|s| s.fact_check_result == stance)
        .count()
}

/// Classifier cross-check of the claim text
#[derive(Debug, Clone, PartialEq)]
pub struct AiSignal {
    pub label: String,
    pub score: f64,
}

impl AiSignal {
    /// Map the top label and its score onto a credibility scalar
    pub fn scalar(&self) -> f64 {
        let score = self.score.clamp(0.0, 1.0);
        match self.label.as_str() {
            "factual" => 0.7 + 0.3 * score,
            "misleading" => 0.4 + 0.2 * score,
            "false" => 0.1 + 0.2 * score,
            "opinion" => 0.6,
            _ => 0.5,
        }
    }
}

pub fn compute_factors(sources: &[Source], counts: StanceCounts, now: DateTime<Utc>) -> CredibilityFactors {
    CredibilityFactors {
        source_reliability: source_reliability(sources),
        evidence_strength: evidence_strength(counts),
        consensus_level: consensus_level(counts),
        recency: recency(sources, now),
        author_credibility: AUTHOR_CREDIBILITY,
    }
}

fn source_reliability(sources: &[Source]) -> f64 {
    if sources.is_empty() {
        return NO_SOURCES_DEFAULT;
    }
    sources.iter().map(|s| s.reliability).sum::<f64>() / sources.len() as f64
}

fn evidence_strength(counts: StanceCounts) -> f64 {
    if counts.total == 0 {
        return 0.5;
    }
    let total = counts.total as f64;
    if counts.supporting > counts.contradicting {
        0.7 + (counts.supporting as f64 / total) * 0.3
    } else if counts.contradicting > counts.supporting {
        0.3 - (counts.contradicting as f64 / total) * 0.3
    } else {
        0.5
    }
}

fn consensus_level(counts: StanceCounts) -> f64 {
    if counts.total == 0 {
        return NO_SOURCES_DEFAULT;
    }
    counts.supporting.max(counts.contradicting) as f64 / counts.total as f64
}

fn recency(sources: &[Source], now: DateTime<Utc>) -> f64 {
    if sources.is_empty() {
        return UNDATED_RECENCY;
    }
    let total: f64 = sources
        .iter()
        .map(|s| match s.publish_date {
            Some(published) => {
                let days = (now - published).num_days() as f64;
                (1.0 - days / 365.0).clamp(MIN_RECENCY, 1.0)
            }
            None => UNDATED_RECENCY,
        })
        .sum();
    total / sources.len() as f64
}

/// Weighted sum of the factors, each clamped to [0, 1] first
pub fn overall_score(factors: &CredibilityFactors) -> f64 {
    let weighted = WEIGHT_SOURCE_RELIABILITY * factors.source_reliability.clamp(0.0, 1.0)
        + WEIGHT_EVIDENCE_STRENGTH * factors.evidence_strength.clamp(0.0, 1.0)
        + WEIGHT_CONSENSUS * factors.consensus_level.clamp(0.0, 1.0)
        + WEIGHT_RECENCY * factors.recency.clamp(0.0, 1.0)
        + WEIGHT_AUTHOR * factors.author_credibility.clamp(0.0, 1.0);
    weighted.clamp(0.0, 1.0)
}

/// Confidence grows with consensus and with the number of sources, saturating at five
pub fn confidence(factors: &CredibilityFactors, counts: StanceCounts) -> f64 {
    let coverage = (counts.total as f64 / 5.0).min(1.0);
    (0.3 + 0.4 * factors.consensus_level.clamp(0.0, 1.0) + 0.3 * coverage).clamp(0.0, 1.0)
}

pub fn verdict(score: f64, counts: StanceCounts) -> Verdict {
    if score >= 0.8 && counts.supporting > counts.contradicting {
        Verdict::Verified
    } else if score <= 0.3 || counts.contradicting > counts.supporting {
        Verdict::False
    } else if score >= 0.6 {
        Verdict::Unverified
    } else {
        Verdict::Disputed
    }
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

/// Templated explanation of the factors that crossed a threshold
pub fn build_reasoning(
    factors: &CredibilityFactors,
    counts: StanceCounts,
    ai: Option<&AiSignal>,
) -> String {
    let mut parts = Vec::new();

    if counts.total == 0 {
        parts.push("No corroborating sources were found.".to_string());
    } else if factors.source_reliability >= 0.8 {
        parts.push(format!(
            "Sources are highly reliable (average {}).",
            percent(factors.source_reliability)
        ));
    } else if factors.source_reliability >= 0.6 {
        parts.push("Sources are moderately reliable.".to_string());
    } else {
        parts.push("Source reliability is low.".to_string());
    }

    if counts.supporting > counts.contradicting {
        parts.push(format!(
            "{} of {} sources support the claim.",
            counts.supporting, counts.total
        ));
    } else if counts.contradicting > counts.supporting {
        parts.push(format!(
            "{} of {} sources contradict the claim.",
            counts.contradicting, counts.total
        ));
    } else if counts.total > 0 {
        parts.push(format!(
            "Evidence is mixed ({} supporting, {} contradicting).",
            counts.supporting, counts.contradicting
        ));
    }

    if counts.total > 0 && factors.consensus_level >= 0.7 {
        parts.push("Sources show strong consensus.".to_string());
    }

    if factors.recency >= 0.8 {
        parts.push("Evidence is recent.".to_string());
    } else if factors.recency < 0.5 {
        parts.push("Evidence is dated.".to_string());
    }

    if let Some(ai) = ai {
        parts.push(format!(
            "Automated analysis labels the claim {} ({}).",
            ai.label,
            percent(ai.scalar())
        ));
    }

    parts.join(" ")
}

/// Full assessment of a claim against its selected sources
pub fn assess(
    sources: &[Source],
    ai: Option<&AiSignal>,
    now: DateTime<Utc>,
) -> Result<(CredibilityAssessment, Verdict), AssessmentError> {
    let counts = StanceCounts::from_sources(sources);
    let factors = compute_factors(sources, counts, now);
    if !factors.is_finite() {
        return Err(AssessmentError::InvalidFactors(format!("{:?}", factors)));
    }

    let overall_score = overall_score(&factors);
    let assessment = CredibilityAssessment {
        overall_score,
        confidence: confidence(&factors, counts),
        reasoning: build_reasoning(&factors, counts, ai),
        risk_level: RiskLevel::from_score(overall_score),
        factors,
    };

    Ok((assessment, verdict(overall_score, counts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SourceType, SourceVerification};
    use chrono::Duration;
    use url::Url;

    fn source(reliability: f64, stance: SourceStance, published: Option<DateTime<Utc>>) -> Source {
        Source {
            url: Url::parse("https://example.org/a").unwrap(),
            title: "A".to_string(),
            domain: "example.org".to_string(),
            reliability,
            publish_date: published,
            author: None,
            relevance_score: 0.8,
            fact_check_result: stance,
            source_type: SourceType::News,
            verification_status: SourceVerification::Verified,
        }
    }

    #[test]
    fn test_three_supporting_sources_verified() {
        let sources = vec![
            source(0.9, SourceStance::Supports, None),
            source(0.85, SourceStance::Supports, None),
            source(0.95, SourceStance::Supports, None),
        ];
        let (assessment, verdict) = assess(&sources, None, Utc::now()).unwrap();
        assert_eq!(verdict, Verdict::Verified);
        assert!(assessment.overall_score >= 0.6);
        assert_eq!(assessment.factors.evidence_strength, 1.0);
        assert_eq!(assessment.factors.consensus_level, 1.0);
        assert_eq!(assessment.factors.recency, 0.5);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_no_sources_defaults() {
        let (assessment, verdict) = assess(&[], None, Utc::now()).unwrap();
        let f = assessment.factors;
        assert_eq!(f.source_reliability, 0.3);
        assert_eq!(f.evidence_strength, 0.5);
        assert_eq!(f.consensus_level, 0.3);
        assert_eq!(f.recency, 0.5);
        // 0.09 + 0.125 + 0.06 + 0.05 + 0.105
        assert!((assessment.overall_score - 0.43).abs() < 1e-9);
        assert_eq!(verdict, Verdict::Disputed);
        assert!(assessment.reasoning.starts_with("No corroborating sources"));
    }

    #[test]
    fn test_contradicting_sources_are_false() {
        let sources = vec![
            source(0.9, SourceStance::Contradicts, None),
            source(0.9, SourceStance::Neutral, None),
        ];
        let (assessment, verdict) = assess(&sources, None, Utc::now()).unwrap();
        assert!((assessment.factors.evidence_strength - 0.15).abs() < 1e-9);
        assert_eq!(assessment.factors.consensus_level, 0.5);
        assert_eq!(verdict, Verdict::False);
    }

    #[test]
    fn test_recency() {
        let now = Utc::now();
        let sources = vec![
            source(0.9, SourceStance::Neutral, Some(now)),
            source(0.9, SourceStance::Neutral, Some(now - Duration::days(730))),
            source(0.9, SourceStance::Neutral, None),
        ];
        let f = compute_factors(&sources, StanceCounts::from_sources(&sources), now);
        assert!((f.recency - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_overall_score_bounded_for_any_factors() {
        let extreme = CredibilityFactors {
            source_reliability: 5.0,
            evidence_strength: 3.0,
            consensus_level: 2.0,
            recency: 9.0,
            author_credibility: 4.0,
        };
        assert_eq!(overall_score(&extreme), 1.0);

        let negative = CredibilityFactors {
            source_reliability: -1.0,
            evidence_strength: -3.0,
            consensus_level: -2.0,
            recency: -9.0,
            author_credibility: -4.0,
        };
        assert_eq!(overall_score(&negative), 0.0);
    }

    #[test]
    fn test_verdict_rules() {
        let support = StanceCounts { supporting: 2, contradicting: 0, total: 2 };
        let even = StanceCounts { supporting: 1, contradicting: 1, total: 2 };
        let contra = StanceCounts { supporting: 0, contradicting: 1, total: 1 };

        assert_eq!(verdict(0.85, support), Verdict::Verified);
        assert_eq!(verdict(0.85, even), Verdict::Unverified);
        assert_eq!(verdict(0.7, contra), Verdict::False);
        assert_eq!(verdict(0.3, support), Verdict::False);
        assert_eq!(verdict(0.5, even), Verdict::Disputed);
    }

    #[test]
    fn test_ai_scalar_mapping() {
        let signal = |label: &str, score: f64| AiSignal { label: label.to_string(), score };
        assert!((signal("factual", 1.0).scalar() - 1.0).abs() < 1e-9);
        assert!((signal("misleading", 0.5).scalar() - 0.5).abs() < 1e-9);
        assert!((signal("false", 0.5).scalar() - 0.2).abs() < 1e-9);
        assert_eq!(signal("opinion", 0.9).scalar(), 0.6);
        assert_eq!(signal("unverifiable", 0.9).scalar(), 0.5);
    }

    #[test]
    fn test_ai_signal_only_affects_reasoning() {
        let sources = vec![source(0.9, SourceStance::Supports, None)];
        let now = Utc::now();
        let ai = AiSignal { label: "false".to_string(), score: 0.99 };
        let (with_ai, _) = assess(&sources, Some(&ai), now).unwrap();
        let (without_ai, _) = assess(&sources, None, now).unwrap();
        assert_eq!(with_ai.overall_score, without_ai.overall_score);
        assert!(with_ai.reasoning.contains("labels the claim false"));
        assert!(!without_ai.reasoning.contains("Automated analysis"));
    }

    #[test]
    fn test_non_finite_factors_rejected() {
        let sources = vec![source(f64::NAN, SourceStance::Supports, None)];
        assert!(matches!(
            assess(&sources, None, Utc::now()),
            Err(AssessmentError::InvalidFactors(_))
        ));
    }
}

//! Per-claim verdict and harm resolution
//!
//! Verdict signals are ranked by a fixed priority: the scorer first, then
//! fact-check databases, then generative reasoning. The highest-priority
//! signal present decides.

use crate::model::{ClaimAnalysis, ClaimCategory, DatabaseMatch, DatabaseVerdict, RiskLevel, Verdict};

/// Precedence of a verdict signal; later variants override earlier ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignalPriority {
    Scorer,
    Database,
    Reasoning,
}

/// Pick the verdict of the highest-priority signal; on equal priority the later one wins
pub fn resolve_verdict(signals: &[(Verdict, SignalPriority)]) -> Verdict {
    signals
        .iter()
        .enumerate()
        .max_by_key(|(index, (_, priority))| (*priority, *index))
        .map(|(_, (verdict, _))| *verdict)
        .unwrap_or(Verdict::Unverified)
}

/// Majority of false vs true database ratings, when one strictly exceeds the other
pub fn database_verdict(matches: &[DatabaseMatch]) -> Option<Verdict> {
    let false_count = matches
        .iter()
        .filter(|m| m.verdict == DatabaseVerdict::False)
        .count();
    let true_count = matches
        .iter()
        .filter(|m| m.verdict == DatabaseVerdict::True)
        .count();

    if false_count > true_count {
        Some(Verdict::False)
    } else if true_count > false_count {
        Some(Verdict::Verified)
    } else {
        None
    }
}

/// Override from generative reasoning at the extremes of its credibility score
pub fn reasoning_verdict(analysis: &ClaimAnalysis) -> Option<Verdict> {
    if analysis.credibility_score < 0.3 {
        Some(Verdict::False)
    } else if analysis.credibility_score > 0.8 {
        Some(Verdict::Verified)
    } else {
        None
    }
}

/// Harm if the claim were false and believed
pub fn harm_potential(
    reasoning: Option<&ClaimAnalysis>,
    scorer_risk: Option<RiskLevel>,
    category: ClaimCategory,
    score: f64,
) -> RiskLevel {
    if let Some(analysis) = reasoning {
        return analysis.risk_level;
    }
    if let Some(risk) = scorer_risk {
        return risk;
    }
    if category == ClaimCategory::Factual && score < 0.3 {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClaimReview;

    fn db(verdict: DatabaseVerdict) -> DatabaseMatch {
        DatabaseMatch {
            provider: "p".to_string(),
            review: ClaimReview {
                claim_text: "c".to_string(),
                claimant: None,
                publisher: "pub".to_string(),
                url: "https://example.org".to_string(),
                review_date: None,
                textual_rating: "x".to_string(),
            },
            verdict,
            confidence: 0.9,
        }
    }

    fn analysis(score: f64, risk: RiskLevel) -> ClaimAnalysis {
        ClaimAnalysis {
            is_factual: true,
            credibility_score: score,
            risk_level: risk,
            category: ClaimCategory::Factual,
            reasoning: String::new(),
            confidence: 0.8,
            suggested_sources: Vec::new(),
            validated: true,
        }
    }

    #[test]
    fn test_priority_order() {
        use SignalPriority::*;
        assert_eq!(resolve_verdict(&[]), Verdict::Unverified);
        assert_eq!(resolve_verdict(&[(Verdict::Disputed, Scorer)]), Verdict::Disputed);
        assert_eq!(
            resolve_verdict(&[(Verdict::Verified, Scorer), (Verdict::False, Database)]),
            Verdict::False
        );
        assert_eq!(
            resolve_verdict(&[
                (Verdict::False, Reasoning),
                (Verdict::Verified, Database),
                (Verdict::Disputed, Scorer),
            ]),
            Verdict::False
        );
        assert_eq!(
            resolve_verdict(&[(Verdict::False, Database), (Verdict::Verified, Database)]),
            Verdict::Verified
        );
    }

    #[test]
    fn test_database_majority() {
        use DatabaseVerdict::*;
        assert_eq!(database_verdict(&[db(False), db(False), db(True)]), Some(Verdict::False));
        assert_eq!(database_verdict(&[db(True), db(Mixed)]), Some(Verdict::Verified));
        assert_eq!(database_verdict(&[db(True), db(False)]), None);
        assert_eq!(database_verdict(&[db(Mixed), db(Unproven)]), None);
        assert_eq!(database_verdict(&[]), None);
    }

    #[test]
    fn test_reasoning_thresholds() {
        assert_eq!(reasoning_verdict(&analysis(0.2, RiskLevel::High)), Some(Verdict::False));
        assert_eq!(reasoning_verdict(&analysis(0.3, RiskLevel::High)), None);
        assert_eq!(reasoning_verdict(&analysis(0.8, RiskLevel::Low)), None);
        assert_eq!(reasoning_verdict(&analysis(0.85, RiskLevel::Low)), Some(Verdict::Verified));
    }

    #[test]
    fn test_harm_preference() {
        let a = analysis(0.2, RiskLevel::Critical);
        assert_eq!(
            harm_potential(Some(&a), Some(RiskLevel::Low), ClaimCategory::Factual, 0.9),
            RiskLevel::Critical
        );
        assert_eq!(
            harm_potential(None, Some(RiskLevel::Low), ClaimCategory::Factual, 0.1),
            RiskLevel::Low
        );
        assert_eq!(
            harm_potential(None, None, ClaimCategory::Factual, 0.1),
            RiskLevel::High
        );
        assert_eq!(
            harm_potential(None, None, ClaimCategory::Opinion, 0.1),
            RiskLevel::Medium
        );
    }
}

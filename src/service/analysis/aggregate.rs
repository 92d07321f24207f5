//! Roll-up of per-claim results into an overall assessment

use crate::model::{EnhancedClaim, OverallAssessment, RiskLevel, Verdict};

/// Fixed result for text without extractable claims
pub fn no_claims_assessment() -> OverallAssessment {
    OverallAssessment {
        credibility_score: 0.5,
        risk_level: RiskLevel::Low,
        confidence: 0.3,
        reasoning: "No verifiable claims were found in the text.".to_string(),
    }
}

pub fn overall_assessment(claims: &[EnhancedClaim]) -> OverallAssessment {
    if claims.is_empty() {
        return no_claims_assessment();
    }

    let count = claims.len() as f64;
    let credibility_score = claims
        .iter()
        .map(|c| c.fact_check.credibility_score)
        .sum::<f64>()
        / count;

    let confidence = claims
        .iter()
        .map(|c| match c.reasoning_analysis {
            Some(ref analysis) => analysis.confidence,
            None => c.fact_check.credibility_assessment.confidence,
        })
        .sum::<f64>()
        / count;

    let risk_level = if claims.iter().any(|c| c.harm_potential == RiskLevel::Critical) {
        RiskLevel::Critical
    } else if claims.iter().any(|c| c.harm_potential == RiskLevel::High) {
        RiskLevel::High
    } else if credibility_score < 0.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let false_claims = claims
        .iter()
        .filter(|c| c.final_verdict == Verdict::False)
        .count();
    let verified_claims = claims
        .iter()
        .filter(|c| c.final_verdict == Verdict::Verified)
        .count();

    let reasoning = format!(
        "Analyzed {} claim(s): {} verified, {} likely false. Average credibility {}%.",
        claims.len(),
        verified_claims,
        false_claims,
        (credibility_score * 100.0).round()
    );

    OverallAssessment {
        credibility_score: credibility_score.clamp(0.0, 1.0),
        risk_level,
        confidence: confidence.clamp(0.0, 1.0),
        reasoning,
    }
}

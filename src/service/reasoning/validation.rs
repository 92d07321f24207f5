//! Validation of generative reasoning output before use
//!
//! Model output is untrusted: scores must be finite and in bounds, and
//! enumerated fields must name a known value.

use crate::model::{
    ClaimAnalysis, ClaimCategory, ExtractedClaimAnalysis, ExtractedTopics, RiskLevel,
};

/// Topics beyond this count are dropped
pub const MAX_TOPICS: usize = 10;

const KNOWN_CATEGORIES: &[&str] = &["factual", "opinion", "prediction", "statistical", "unknown"];

/// Result of validating model output
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Check bounds and enum membership of an extracted claim analysis
pub fn validate_claim_analysis(analysis: &ExtractedClaimAnalysis) -> ValidationResult {
    let mut result = ValidationResult::valid();

    check_unit_interval(&mut result, "credibility_score", analysis.credibility_score);
    check_unit_interval(&mut result, "confidence", analysis.confidence);

    if RiskLevel::parse(&analysis.risk_level).is_none() {
        result.add_error(format!("Unknown risk_level '{}'", analysis.risk_level));
    }

    let category = analysis.category.trim().to_lowercase();
    if !KNOWN_CATEGORIES.contains(&category.as_str()) {
        result.add_error(format!("Unknown category '{}'", analysis.category));
    }

    if analysis.reasoning.trim().is_empty() {
        result.add_warning("Analysis has no reasoning".to_string());
    }

    result
}

fn check_unit_interval(result: &mut ValidationResult, field: &str, value: f64) {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        result.add_error(format!("{} out of range: {}", field, value));
    }
}

/// Convert a validated extraction into the domain model
///
/// Callers must validate first; unknown values fall back to neutral variants.
pub fn convert_claim_analysis(analysis: ExtractedClaimAnalysis) -> ClaimAnalysis {
    ClaimAnalysis {
        is_factual: analysis.is_factual,
        credibility_score: analysis.credibility_score,
        risk_level: RiskLevel::parse(&analysis.risk_level).unwrap_or(RiskLevel::Medium),
        category: ClaimCategory::from_label(&analysis.category),
        reasoning: analysis.reasoning,
        confidence: analysis.confidence,
        suggested_sources: analysis
            .suggested_sources
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        validated: true,
    }
}

/// Clean extracted topics: trimmed, non-empty, case-insensitively unique, at most ten
pub fn clean_topics(topics: ExtractedTopics) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for topic in topics.topics {
        let topic = topic.trim();
        if topic.is_empty() {
            continue;
        }
        if cleaned.iter().any(|t| t.eq_ignore_ascii_case(topic)) {
            continue;
        }
        cleaned.push(topic.to_string());
        if cleaned.len() == MAX_TOPICS {
            break;
        }
    }
    cleaned
}

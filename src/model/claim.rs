use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of statement a claim makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    Factual,
    Opinion,
    Prediction,
    Statistical,
    Unknown,
}

impl ClaimCategory {
    /// Labels offered to the zero-shot classifier during extraction
    pub const CANDIDATE_LABELS: [&'static str; 5] =
        ["factual", "opinion", "prediction", "statistical", "unknown"];

    /// Map a classifier label back to a category; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "factual" => ClaimCategory::Factual,
            "opinion" => ClaimCategory::Opinion,
            "prediction" => ClaimCategory::Prediction,
            "statistical" => ClaimCategory::Statistical,
            _ => ClaimCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Factual => "factual",
            ClaimCategory::Opinion => "opinion",
            ClaimCategory::Prediction => "prediction",
            ClaimCategory::Statistical => "statistical",
            ClaimCategory::Unknown => "unknown",
        }
    }
}

/// Character offsets of a claim within the analysed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TextPosition {
    pub start: usize,
    pub end: usize,
}

/// A candidate statement extracted from the input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claim {
    /// Unique within one analysis run only
    pub id: String,
    pub text: String,
    /// Classifier (or QA) score in [0, 1]
    pub confidence: f64,
    pub category: ClaimCategory,
    /// Surrounding text window, clipped to the input bounds
    pub context: String,
    pub position: TextPosition,
    /// First ten significant tokens, in order of appearance
    pub keywords: Vec<String>,
}

/// Options controlling claim extraction
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ExtractionOptions {
    /// Maximum number of claims returned (callers constrain to 1-50)
    pub max_claims: usize,
    /// Sentences classified below this score are dropped
    pub min_confidence: f64,
    /// Keep sentences classified as opinion
    pub include_opinions: bool,
    /// Characters of context captured on each side of a claim
    pub context_window: usize,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            max_claims: 20,
            min_confidence: 0.5,
            include_opinions: false,
            context_window: 100,
        }
    }
}

/// Output of a claim extraction call
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    pub claims: Vec<Claim>,
    pub total_claims: usize,
    pub processing_time_ms: u64,
    pub text_length: usize,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_labels_cover_every_category() {
        let categories: Vec<ClaimCategory> = ClaimCategory::CANDIDATE_LABELS
            .iter()
            .map(|label| ClaimCategory::from_label(label))
            .collect();
        assert_eq!(
            categories,
            vec![
                ClaimCategory::Factual,
                ClaimCategory::Opinion,
                ClaimCategory::Prediction,
                ClaimCategory::Statistical,
                ClaimCategory::Unknown,
            ]
        );
        for category in categories {
            assert_eq!(ClaimCategory::from_label(category.as_str()), category);
        }
    }
}

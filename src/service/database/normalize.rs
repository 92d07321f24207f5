//! Normalization of free-text ClaimReview ratings

use crate::model::DatabaseVerdict;

const MIXED_MARKERS: &[&str] = &["half", "mixed", "mixture", "partly", "partially"];
const DISPUTED_MARKERS: &[&str] = &[
    "misleading",
    "disputed",
    "exaggerat",
    "out of context",
    "lacks context",
    "missing context",
    "distort",
];
const UNPROVEN_MARKERS: &[&str] = &["unproven", "unverified", "unsupported", "undetermined"];
const FALSE_MARKERS: &[&str] = &[
    "false",
    "fake",
    "incorrect",
    "fabricated",
    "not true",
    "wrong",
    "hoax",
];
const TRUE_MARKERS: &[&str] = &["true", "correct", "accurate", "verified"];

fn contains_any(rating: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| rating.contains(m))
}

/// Map a provider's textual rating to a verdict and a confidence in that mapping
pub fn normalize_rating(rating: &str) -> (DatabaseVerdict, f64) {
    let rating = rating.trim().to_lowercase();

    if rating.contains("pants on fire") {
        return (DatabaseVerdict::False, 0.95);
    }

    let verdict = if contains_any(&rating, MIXED_MARKERS) {
        DatabaseVerdict::Mixed
    } else if contains_any(&rating, DISPUTED_MARKERS) {
        DatabaseVerdict::Disputed
    } else if contains_any(&rating, UNPROVEN_MARKERS) {
        DatabaseVerdict::Unproven
    } else if contains_any(&rating, FALSE_MARKERS) {
        DatabaseVerdict::False
    } else if contains_any(&rating, TRUE_MARKERS) {
        DatabaseVerdict::True
    } else {
        DatabaseVerdict::Unproven
    };

    let confidence = match rating.as_str() {
        "false" | "true" => 0.9,
        _ if rating.contains("mostly") => 0.7,
        _ if verdict == DatabaseVerdict::Mixed => 0.6,
        _ => 0.5,
    };

    (verdict, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert_eq!(normalize_rating("Pants on Fire!"), (DatabaseVerdict::False, 0.95));
        assert_eq!(normalize_rating("False"), (DatabaseVerdict::False, 0.9));
        assert_eq!(normalize_rating(" TRUE "), (DatabaseVerdict::True, 0.9));
        assert_eq!(normalize_rating("Mostly False"), (DatabaseVerdict::False, 0.7));
        assert_eq!(normalize_rating("Mostly True"), (DatabaseVerdict::True, 0.7));
    }

    #[test]
    fn test_mixed_before_true_or_false() {
        assert_eq!(normalize_rating("Half True"), (DatabaseVerdict::Mixed, 0.6));
        assert_eq!(normalize_rating("Partly false"), (DatabaseVerdict::Mixed, 0.6));
    }

    #[test]
    fn test_negated_true_is_false() {
        assert_eq!(normalize_rating("Not true").0, DatabaseVerdict::False);
    }

    #[test]
    fn test_disputed_and_unproven() {
        assert_eq!(normalize_rating("Misleading").0, DatabaseVerdict::Disputed);
        assert_eq!(normalize_rating("Exaggerated").0, DatabaseVerdict::Disputed);
        assert_eq!(normalize_rating("Unproven"), (DatabaseVerdict::Unproven, 0.5));
        assert_eq!(normalize_rating("Unverified").0, DatabaseVerdict::Unproven);
        assert_eq!(normalize_rating("").0, DatabaseVerdict::Unproven);
    }
}

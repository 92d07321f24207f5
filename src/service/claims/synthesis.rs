//! Claim deduplication

use std::collections::HashSet;

use crate::model::Claim;

/// Claims whose word sets overlap more than this are duplicates
pub const DUPLICATE_THRESHOLD: f64 = 0.8;

/// Drop near-identical claims, keeping the first occurrence of each
pub fn deduplicate_claims(claims: Vec<Claim>) -> Vec<Claim> {
    let mut kept: Vec<(Claim, HashSet<String>)> = Vec::with_capacity(claims.len());

    for claim in claims {
        let words = word_set(&claim.text);
        let duplicate = kept
            .iter()
            .any(|(_, existing)| jaccard_similarity(&words, existing) > DUPLICATE_THRESHOLD);

        if duplicate {
            tracing::debug!(claim_id = %claim.id, "Dropping duplicate claim");
            continue;
        }
        kept.push((claim, words));
    }

    kept.into_iter().map(|(claim, _)| claim).collect()
}

/// Lowercase word set, with punctuation trimmed from token edges
pub fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Intersection over union of two word sets
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

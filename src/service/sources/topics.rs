//! Term-frequency topic fallback

use std::collections::HashMap;

use crate::service::claims::segmentation::STOP_WORDS;

const MAX_TOPICS: usize = 10;

/// Top ten stop-word-filtered terms by count; ties keep first appearance
pub fn term_frequency_topics(text: &str) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for (index, token) in text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 3 && !STOP_WORDS.contains(t))
        .enumerate()
    {
        counts
            .entry(token.to_string())
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(term, _, _)| term)
        .collect()
}

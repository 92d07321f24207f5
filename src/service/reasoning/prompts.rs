//! Prompts for generative claim reasoning

/// Maximum characters of input text forwarded for topic extraction
pub const MAX_TOPIC_INPUT_CHARS: usize = 8000;

/// System prompt for topic extraction
pub const TOPICS_SYSTEM_PROMPT: &str = r#"You are a research assistant preparing web searches.

Your role is to identify the main subjects of a text so that evidence about
its claims can be found.

You must:
- Return between 5 and 10 short search terms (one to four words each)
- Prefer named entities, events, statistics and specific subjects
- Use the language of the text

Do not:
- Return full sentences
- Invent subjects that are not present in the text

Your output must be structured JSON only and conform to the requested schema."#;

/// System prompt for single-claim analysis
pub const CLAIM_ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a careful fact-checking analyst.

Your role is to assess a single claim for factuality, credibility and the
potential for real-world harm if it were false and believed.

You must:
- Judge only the claim as written
- Be conservative when you are uncertain and lower your confidence accordingly
- Use credibility_score and confidence values between 0.0 and 1.0
- Use exactly one of low, medium, high, critical for risk_level
- Use exactly one of factual, opinion, prediction, statistical, unknown for category

Do not:
- Invent sources or citations; suggest only well-known outlets or databases
- Treat popularity of a claim as evidence of its truth

Your output must be structured JSON only and conform to the requested schema."#;

/// Build the topic extraction prompt
pub fn build_topics_prompt(text: &str) -> String {
    let truncated: String = text.chars().take(MAX_TOPIC_INPUT_CHARS).collect();
    format!(
        r#"Identify the main search topics of the following text.

Text:
---
{truncated}
---"#
    )
}

/// Build the claim analysis prompt
pub fn build_claim_prompt(claim: &str) -> String {
    format!(
        r#"Analyze the following claim.

Claim:
---
{claim}
---

Assess whether it is a factual statement, how credible it is, and how harmful
it would be if it were false."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_prompt_truncates() {
        let text = "a".repeat(MAX_TOPIC_INPUT_CHARS + 500);
        let prompt = build_topics_prompt(&text);
        assert!(prompt.len() < text.len());
        assert!(prompt.contains(&"a".repeat(MAX_TOPIC_INPUT_CHARS)));
    }
}

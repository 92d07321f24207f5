//! Claim extraction service
//!
//! Segments text into sentences, classifies each with a zero-shot classifier,
//! adds answers from canned extractive-QA questions, then deduplicates and ranks.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::model::config::RateLimitConfig;
use crate::model::{Claim, ClaimCategory, ExtractionOptions, ExtractionResult, TextPosition};
use crate::service::claims::prompts::{
    EXTRACTION_QUESTIONS, MIN_ANSWER_LENGTH, MIN_ANSWER_SCORE,
};
use crate::service::claims::segmentation::{
    Sentence, context_window, extract_keywords, split_sentences,
};
use crate::service::claims::synthesis::deduplicate_claims;
use crate::service::ids::IdGenerator;
use crate::service::inference::{QuestionAnswerer, TextClassifier};
use crate::service::language::detect_language;
use crate::service::rate_limit::{RateLimiter, SharedRateLimiter};

pub mod error;
pub mod prompts;
pub mod segmentation;
pub mod synthesis;

pub use error::ClaimExtractionError;

pub const MIN_TEXT_LENGTH: usize = 50;
pub const MAX_TEXT_LENGTH: usize = 50_000;

/// Service for extracting candidate claims from text
pub struct ClaimExtractionService {
    classifier: Arc<dyn TextClassifier>,
    question_answerer: Option<Arc<dyn QuestionAnswerer>>,
    ids: Arc<dyn IdGenerator>,
    classifier_limiter: SharedRateLimiter,
    qa_limiter: Mutex<RateLimiter>,
}

impl ClaimExtractionService {
    pub fn new(
        classifier: Arc<dyn TextClassifier>,
        question_answerer: Option<Arc<dyn QuestionAnswerer>>,
        ids: Arc<dyn IdGenerator>,
        classifier_limiter: SharedRateLimiter,
        limits: &RateLimitConfig,
    ) -> Self {
        tracing::info!(
            question_answering = question_answerer.is_some(),
            "Claim extraction service initialized"
        );
        Self {
            classifier,
            question_answerer,
            ids,
            classifier_limiter,
            qa_limiter: Mutex::new(limits.question_answering.limiter()),
        }
    }

    /// Extract, deduplicate and rank claims from `text`
    pub async fn extract_claims(
        &self,
        text: &str,
        options: &ExtractionOptions,
    ) -> Result<ExtractionResult, ClaimExtractionError> {
        validate_input(text)?;
        self.extract_from_validated(text, options).await
    }

    /// Extraction without the length bounds, for text derived from input
    /// that already passed `validate_input` (e.g. a translation)
    pub(crate) async fn extract_from_validated(
        &self,
        text: &str,
        options: &ExtractionOptions,
    ) -> Result<ExtractionResult, ClaimExtractionError> {
        let start_time = Instant::now();

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            tracing::error!(text_length = text.len(), "No sentences found in text");
            return Err(ClaimExtractionError::NoSentences);
        }

        let mut claims = self.claims_from_sentences(text, &sentences, options).await;
        let sentence_claims = claims.len();

        claims.extend(self.claims_from_questions(text, options).await);
        let qa_claims = claims.len() - sentence_claims;

        let mut claims = deduplicate_claims(claims);
        let total_claims = claims.len();

        claims.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        claims.truncate(options.max_claims);

        let elapsed = start_time.elapsed();
        tracing::info!(
            sentences = sentences.len(),
            sentence_claims = sentence_claims,
            qa_claims = qa_claims,
            after_dedup = total_claims,
            returned = claims.len(),
            elapsed_ms = elapsed.as_millis(),
            "Claim extraction complete"
        );

        Ok(ExtractionResult {
            claims,
            total_claims,
            processing_time_ms: elapsed.as_millis() as u64,
            text_length: text.chars().count(),
            language: detect_language(text).detected,
        })
    }

    /// Classify each sentence; failures skip that sentence only
    async fn claims_from_sentences(
        &self,
        text: &str,
        sentences: &[Sentence],
        options: &ExtractionOptions,
    ) -> Vec<Claim> {
        let mut claims = Vec::new();

        for sentence in sentences {
            self.classifier_limiter.lock().await.acquire().await;

            let classification = match self
                .classifier
                .classify(&sentence.text, &ClaimCategory::CANDIDATE_LABELS)
                .await
            {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(
                        start = sentence.position.start,
                        error = %e,
                        "Sentence classification failed, skipping"
                    );
                    continue;
                }
            };

            let category = ClaimCategory::from_label(&classification.top_label);
            if category == ClaimCategory::Opinion && !options.include_opinions {
                tracing::debug!(start = sentence.position.start, "Skipping opinion");
                continue;
            }
            if classification.score < options.min_confidence {
                tracing::debug!(
                    start = sentence.position.start,
                    score = classification.score,
                    "Skipping low-confidence sentence"
                );
                continue;
            }

            claims.push(self.build_claim(
                text,
                &sentence.text,
                sentence.position,
                classification.score,
                category,
                options.context_window,
            ));
        }

        claims
    }

    /// Ask the canned questions against the whole text; failures skip that question only
    async fn claims_from_questions(&self, text: &str, options: &ExtractionOptions) -> Vec<Claim> {
        let Some(ref qa) = self.question_answerer else {
            return Vec::new();
        };

        let mut claims = Vec::new();

        for question in EXTRACTION_QUESTIONS {
            self.qa_limiter.lock().await.acquire().await;

            let answer = match qa.answer(question, text).await {
                Ok(a) => a,
                Err(e) => {
                    tracing::warn!(question = %question, error = %e, "Question answering failed, skipping");
                    continue;
                }
            };

            let answer_text = answer.answer.trim();
            if answer.score <= MIN_ANSWER_SCORE || answer_text.chars().count() <= MIN_ANSWER_LENGTH {
                tracing::debug!(question = %question, score = answer.score, "Discarding weak answer");
                continue;
            }

            let position = TextPosition {
                start: answer.start,
                end: answer.end.max(answer.start),
            };
            claims.push(self.build_claim(
                text,
                answer_text,
                position,
                answer.score,
                ClaimCategory::Factual,
                options.context_window,
            ));
        }

        claims
    }

    fn build_claim(
        &self,
        text: &str,
        claim_text: &str,
        position: TextPosition,
        confidence: f64,
        category: ClaimCategory,
        window: usize,
    ) -> Claim {
        Claim {
            id: self.ids.next_id(),
            text: claim_text.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            category,
            context: context_window(text, position, window),
            position,
            keywords: extract_keywords(claim_text),
        }
    }
}

/// Reject text outside the accepted length bounds
pub fn validate_input(text: &str) -> Result<(), ClaimExtractionError> {
    let trimmed_length = text.trim().chars().count();
    if trimmed_length < MIN_TEXT_LENGTH {
        return Err(ClaimExtractionError::InputTooShort {
            length: trimmed_length,
        });
    }

    let length = text.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(ClaimExtractionError::InputTooLong { length });
    }

    Ok(())
}

//! Credibility scoring of individual claims
//!
//! Scores a claim against a pool of evidence sources. Any internal failure
//! produces a neutral assessment instead of an error, so callers always get
//! a result.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::model::{
    Claim, CredibilityAssessment, CredibilityFactors, FactCheckOptions, FactCheckResult,
    RiskLevel, Source, Verdict,
};
use crate::service::assessment::factors::{AI_LABELS, AiSignal, assess};
use crate::service::inference::TextClassifier;
use crate::service::rate_limit::SharedRateLimiter;
use crate::service::sources::SourceService;

pub mod error;
pub mod factors;

pub use error::AssessmentError;

/// Service for fact-checking claims against evidence sources
pub struct CredibilityService {
    sources: Arc<SourceService>,
    classifier: Option<Arc<dyn TextClassifier>>,
    classifier_limiter: SharedRateLimiter,
}

impl CredibilityService {
    pub fn new(
        sources: Arc<SourceService>,
        classifier: Option<Arc<dyn TextClassifier>>,
        classifier_limiter: SharedRateLimiter,
    ) -> Self {
        tracing::info!(
            ai_cross_check = classifier.is_some(),
            "Credibility service initialized"
        );
        Self {
            sources,
            classifier,
            classifier_limiter,
        }
    }

    /// Fact-check a claim, using `shared_sources` when supplied instead of
    /// generating sources for the claim alone
    pub async fn fact_check_claim(
        &self,
        claim: &Claim,
        options: &FactCheckOptions,
        shared_sources: Option<&[Source]>,
    ) -> FactCheckResult {
        let start_time = Instant::now();

        let result = self.assess_claim(claim, options, shared_sources).await;
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        match result {
            Ok((assessment, verdict, sources)) => {
                tracing::debug!(
                    claim_id = %claim.id,
                    score = assessment.overall_score,
                    verdict = ?verdict,
                    sources = sources.len(),
                    elapsed_ms = elapsed_ms,
                    "Claim fact-check complete"
                );
                FactCheckResult {
                    claim_id: claim.id.clone(),
                    original_claim: claim.text.clone(),
                    credibility_score: assessment.overall_score,
                    credibility_assessment: assessment,
                    sources,
                    verification_status: verdict,
                    processing_time_ms: elapsed_ms,
                }
            }
            Err(e) => {
                tracing::warn!(
                    claim_id = %claim.id,
                    error = %e,
                    "Assessment failed, using neutral default"
                );
                neutral_result(claim, &e, elapsed_ms)
            }
        }
    }

    async fn assess_claim(
        &self,
        claim: &Claim,
        options: &FactCheckOptions,
        shared_sources: Option<&[Source]>,
    ) -> Result<(CredibilityAssessment, Verdict, Vec<Source>), AssessmentError> {
        if claim.text.trim().is_empty() {
            return Err(AssessmentError::EmptyClaim);
        }

        let pool = match shared_sources {
            Some(shared) => shared.to_vec(),
            None => {
                self.sources
                    .generate_sources(&claim.text, &options.sources)
                    .await
            }
        };
        let selected: Vec<Source> = pool
            .into_iter()
            .filter(|s| s.reliability >= options.min_source_reliability)
            .collect();

        let ai = if options.include_ai_analysis {
            self.ai_signal(claim).await
        } else {
            None
        };

        let (assessment, verdict) = assess(&selected, ai.as_ref(), Utc::now())?;
        Ok((assessment, verdict, selected))
    }

    /// Zero-shot cross-check of the claim text; failures omit the signal
    async fn ai_signal(&self, claim: &Claim) -> Option<AiSignal> {
        let classifier = self.classifier.as_ref()?;
        self.classifier_limiter.lock().await.acquire().await;

        match classifier.classify(&claim.text, &AI_LABELS).await {
            Ok(c) => Some(AiSignal {
                label: c.top_label.to_lowercase(),
                score: c.score,
            }),
            Err(e) => {
                tracing::warn!(claim_id = %claim.id, error = %e, "AI cross-check failed");
                None
            }
        }
    }
}

fn neutral_result(claim: &Claim, error: &AssessmentError, elapsed_ms: u64) -> FactCheckResult {
    let assessment = CredibilityAssessment {
        overall_score: 0.5,
        confidence: 0.3,
        factors: CredibilityFactors {
            source_reliability: 0.5,
            evidence_strength: 0.5,
            consensus_level: 0.5,
            recency: 0.5,
            author_credibility: 0.5,
        },
        reasoning: format!("Assessment unavailable: {}", error),
        risk_level: RiskLevel::Medium,
    };

    FactCheckResult {
        claim_id: claim.id.clone(),
        original_claim: claim.text.clone(),
        credibility_score: assessment.overall_score,
        credibility_assessment: assessment,
        sources: Vec::new(),
        verification_status: Verdict::Unverified,
        processing_time_ms: elapsed_ms,
    }
}

//! Analysis orchestrator
//!
//! Runs the full pipeline over a text: language normalization, claim
//! extraction, a shared source pool, then per-claim scoring with optional
//! database and reasoning signals, and finally an overall roll-up.

use std::sync::Arc;
use std::time::Instant;

use crate::model::{
    AnalysisMetadata, AnalysisOptions, Claim, ComprehensiveAnalysisResult, EnhancedClaim,
    FactCheckOptions, LanguageInfo, Source,
};
use crate::service::analysis::aggregate::{no_claims_assessment, overall_assessment};
use crate::service::analysis::verdict::{
    SignalPriority, database_verdict, harm_potential, reasoning_verdict, resolve_verdict,
};
use crate::service::assessment::CredibilityService;
use crate::service::claims::{ClaimExtractionService, validate_input};
use crate::service::database::{FactCheckDatabaseService, successful_matches};
use crate::service::inference::LanguageNormalizer;
use crate::service::language::{UNKNOWN_LANGUAGE, detect_language};
use crate::service::reasoning::ReasoningService;
use crate::service::sources::SourceService;

pub mod aggregate;
pub mod error;
pub mod verdict;

pub use error::AnalysisError;

const STAGE_VALIDATION: &str = "validation";
const STAGE_EXTRACTION: &str = "claim_extraction";

const SERVICE_LANGUAGE: &str = "language_normalization";
const SERVICE_EXTRACTION: &str = "claim_extraction";
const SERVICE_SOURCES: &str = "source_generation";
const SERVICE_SCORING: &str = "credibility_scoring";
const SERVICE_DATABASES: &str = "fact_check_databases";
const SERVICE_REASONING: &str = "generative_reasoning";

/// Per-run counters folded into the result metadata
#[derive(Default)]
struct RunStats {
    database_queries: usize,
    database_failures: usize,
    reasoning_calls: usize,
}

/// Service orchestrating a full content analysis
pub struct AnalysisService {
    normalizer: Option<Arc<dyn LanguageNormalizer>>,
    claims: Arc<ClaimExtractionService>,
    sources: Arc<SourceService>,
    credibility: Arc<CredibilityService>,
    database: Option<Arc<FactCheckDatabaseService>>,
    reasoning: Option<Arc<ReasoningService>>,
}

impl AnalysisService {
    pub fn new(
        normalizer: Option<Arc<dyn LanguageNormalizer>>,
        claims: Arc<ClaimExtractionService>,
        sources: Arc<SourceService>,
        credibility: Arc<CredibilityService>,
        database: Option<Arc<FactCheckDatabaseService>>,
        reasoning: Option<Arc<ReasoningService>>,
    ) -> Self {
        tracing::info!(
            translation = normalizer.is_some(),
            databases = database.is_some(),
            reasoning = reasoning.is_some(),
            "Analysis service initialized"
        );
        Self {
            normalizer,
            claims,
            sources,
            credibility,
            database,
            reasoning,
        }
    }

    /// Analyze `text` end to end
    ///
    /// Fails only on invalid input or a fatal stage error; degraded external
    /// signals shrink the result instead.
    pub async fn analyze(
        &self,
        text: &str,
        options: &AnalysisOptions,
    ) -> Result<ComprehensiveAnalysisResult, AnalysisError> {
        let start_time = Instant::now();

        validate_input(text).map_err(|e| AnalysisError::from_extraction(STAGE_VALIDATION, e))?;

        let mut services_used = Vec::new();

        let (processed_text, language) = self.normalize_language(text).await;
        if language.translated {
            services_used.push(SERVICE_LANGUAGE.to_string());
        }

        // bounds were checked on the original; a translation may be shorter
        let extraction = self
            .claims
            .extract_from_validated(&processed_text, &options.extraction())
            .await
            .map_err(|e| {
                tracing::error!(stage = STAGE_EXTRACTION, error = %e, "Analysis stage failed");
                AnalysisError::from_extraction(STAGE_EXTRACTION, e)
            })?;
        services_used.push(SERVICE_EXTRACTION.to_string());

        if extraction.claims.is_empty() {
            tracing::info!(
                elapsed_ms = start_time.elapsed().as_millis(),
                "No claims found, skipping assessment"
            );
            return Ok(ComprehensiveAnalysisResult {
                original_text: text.to_string(),
                processed_text,
                language,
                claims: Vec::new(),
                sources: Vec::new(),
                overall_assessment: no_claims_assessment(),
                metadata: AnalysisMetadata {
                    processing_time_ms: start_time.elapsed().as_millis() as u64,
                    services_used,
                    ..AnalysisMetadata::default()
                },
            });
        }

        let sources = self
            .sources
            .generate_sources(&processed_text, &options.sources())
            .await;
        services_used.push(SERVICE_SOURCES.to_string());
        services_used.push(SERVICE_SCORING.to_string());

        let fact_check_options = FactCheckOptions {
            sources: options.sources(),
            ..FactCheckOptions::default()
        };

        let mut stats = RunStats::default();
        let mut claims = Vec::with_capacity(extraction.claims.len());
        for claim in extraction.claims {
            claims.push(
                self.assess_claim(claim, &sources, &fact_check_options, options, &mut stats)
                    .await,
            );
        }

        if stats.database_queries > 0 {
            services_used.push(SERVICE_DATABASES.to_string());
        }
        if stats.reasoning_calls > 0 {
            services_used.push(SERVICE_REASONING.to_string());
        }

        let overall = overall_assessment(&claims);
        let elapsed = start_time.elapsed();

        tracing::info!(
            claims = claims.len(),
            sources = sources.len(),
            score = overall.credibility_score,
            risk_level = ?overall.risk_level,
            database_failures = stats.database_failures,
            elapsed_ms = elapsed.as_millis(),
            "Analysis complete"
        );

        Ok(ComprehensiveAnalysisResult {
            original_text: text.to_string(),
            processed_text,
            language,
            metadata: AnalysisMetadata {
                processing_time_ms: elapsed.as_millis() as u64,
                services_used,
                claims_analyzed: claims.len(),
                sources_found: sources.len(),
                database_queries: stats.database_queries,
                database_failures: stats.database_failures,
                reasoning_calls: stats.reasoning_calls,
            },
            claims,
            sources,
            overall_assessment: overall,
        })
    }

    /// Detect the language and translate to English when possible; failures keep the original
    async fn normalize_language(&self, text: &str) -> (String, LanguageInfo) {
        let mut language = detect_language(text);

        let needs_translation =
            language.detected != "en" && language.detected != UNKNOWN_LANGUAGE;
        let Some(ref normalizer) = self.normalizer else {
            return (text.to_string(), language);
        };
        if !needs_translation {
            return (text.to_string(), language);
        }

        match normalizer.translate_to_english(text, &language.detected).await {
            Ok(translated) if !translated.trim().is_empty() => {
                tracing::info!(language = %language.detected, "Text translated to English");
                language.translated = true;
                (translated, language)
            }
            Ok(_) => {
                tracing::warn!(language = %language.detected, "Empty translation, keeping original text");
                (text.to_string(), language)
            }
            Err(e) => {
                tracing::warn!(
                    language = %language.detected,
                    error = %e,
                    "Translation failed, keeping original text"
                );
                (text.to_string(), language)
            }
        }
    }

    async fn assess_claim(
        &self,
        claim: Claim,
        sources: &[Source],
        fact_check_options: &FactCheckOptions,
        options: &AnalysisOptions,
        stats: &mut RunStats,
    ) -> EnhancedClaim {
        let fact_check = self
            .credibility
            .fact_check_claim(&claim, fact_check_options, Some(sources))
            .await;

        let mut signals = vec![(fact_check.verification_status, SignalPriority::Scorer)];

        let database_results = match self.database {
            Some(ref database) if options.search_databases && database.is_available() => {
                let outcomes = database.search(&claim.text).await;
                stats.database_queries += outcomes.len();
                stats.database_failures += outcomes.iter().filter(|o| !o.success).count();
                successful_matches(outcomes)
            }
            _ => Vec::new(),
        };
        if let Some(verdict) = database_verdict(&database_results) {
            signals.push((verdict, SignalPriority::Database));
        }

        let reasoning_analysis = match self.reasoning {
            Some(ref reasoning) if options.deep_analysis => {
                stats.reasoning_calls += 1;
                Some(reasoning.analyze_claim(&claim.text).await)
            }
            _ => None,
        };
        if let Some(verdict) = reasoning_analysis.as_ref().and_then(reasoning_verdict) {
            signals.push((verdict, SignalPriority::Reasoning));
        }

        let final_verdict = resolve_verdict(&signals);
        let harm = harm_potential(
            reasoning_analysis.as_ref(),
            Some(fact_check.credibility_assessment.risk_level),
            claim.category,
            fact_check.credibility_score,
        );

        tracing::debug!(
            claim_id = %claim.id,
            verdict = ?final_verdict,
            harm = ?harm,
            database_matches = database_results.len(),
            "Claim assessed"
        );

        EnhancedClaim {
            claim,
            fact_check,
            database_results,
            reasoning_analysis,
            final_verdict,
            harm_potential: harm,
        }
    }
}

//! OpenAI-backed generative reasoning via rig extractors

use async_trait::async_trait;
use rig::providers::openai;

use crate::model::{ExtractedClaimAnalysis, ExtractedTopics};
use crate::service::health::HealthCheck;
use crate::service::reasoning::prompts::{
    CLAIM_ANALYSIS_SYSTEM_PROMPT, TOPICS_SYSTEM_PROMPT, build_claim_prompt, build_topics_prompt,
};
use crate::service::reasoning::{ClaimReasoner, ReasoningError};

/// Environment variable for the OpenAI API key
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable for the reasoning model (defaults to gpt-4o-mini)
const ENV_REASONING_MODEL: &str = "REASONING_MODEL";

const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

/// Reasoner backed by OpenAI structured extraction
#[derive(Clone)]
pub struct LlmReasoner {
    client: openai::Client,
    model: String,
}

impl LlmReasoner {
    /// Create a reasoner with the provided API key
    pub fn new(api_key: &str) -> Result<Self, ReasoningError> {
        let client = openai::Client::new(api_key)
            .map_err(|e| ReasoningError::ClientSetup(e.to_string()))?;
        let model =
            std::env::var(ENV_REASONING_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        tracing::info!(model = %model, "Reasoning client initialized");

        Ok(Self { client, model })
    }

    /// Build from `OPENAI_API_KEY`; `None` when unset or invalid
    pub fn from_env() -> Option<Self> {
        let Ok(key) = std::env::var(ENV_OPENAI_API_KEY) else {
            tracing::warn!("{ENV_OPENAI_API_KEY} not set, generative reasoning disabled");
            return None;
        };

        match Self::new(&key) {
            Ok(reasoner) => Some(reasoner),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create OpenAI client, generative reasoning disabled");
                None
            }
        }
    }
}

#[async_trait]
impl ClaimReasoner for LlmReasoner {
    async fn extract_topics(&self, text: &str) -> Result<ExtractedTopics, ReasoningError> {
        let prompt = build_topics_prompt(text);
        let start_time = std::time::Instant::now();

        let extractor = self
            .client
            .extractor::<ExtractedTopics>(&self.model)
            .preamble(TOPICS_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        match extractor.extract(&prompt).await {
            Ok(topics) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    topics = topics.topics.len(),
                    "Topic extraction completed"
                );
                Ok(topics)
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Topic extraction failed"
                );
                Err(ReasoningError::ExtractionFailed(e.to_string()))
            }
        }
    }

    async fn analyze_claim(&self, claim: &str) -> Result<ExtractedClaimAnalysis, ReasoningError> {
        let prompt = build_claim_prompt(claim);
        let prompt_length = prompt.len();
        let start_time = std::time::Instant::now();

        let extractor = self
            .client
            .extractor::<ExtractedClaimAnalysis>(&self.model)
            .preamble(CLAIM_ANALYSIS_SYSTEM_PROMPT)
            .additional_params(serde_json::json!({
                "temperature": 0.0,
                "seed": 42
            }))
            .build();

        match extractor.extract(&prompt).await {
            Ok(analysis) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    "Claim analysis completed"
                );
                Ok(analysis)
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "Claim analysis failed"
                );
                Err(ReasoningError::ExtractionFailed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl HealthCheck for LlmReasoner {
    fn service_name(&self) -> &str {
        "generative_reasoning"
    }

    async fn check(&self) -> Result<(), String> {
        // The client only exists when a key was configured
        Ok(())
    }
}

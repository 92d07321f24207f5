//! Hugging Face inference API client

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{
    Classification, InferenceError, LanguageNormalizer, QaAnswer, QuestionAnswerer, TextClassifier,
};
use crate::service::health::HealthCheck;

const HF_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
const ENV_HF_BASE_URL: &str = "HF_INFERENCE_BASE_URL";
const ENV_HF_TOKEN: &str = "HF_API_TOKEN";
const ENV_CLASSIFIER_MODEL: &str = "HF_CLASSIFIER_MODEL";
const ENV_QA_MODEL: &str = "HF_QA_MODEL";

const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";
const DEFAULT_QA_MODEL: &str = "deepset/roberta-base-squad2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Translation models accept short inputs only; longer text is translated in chunks
const MAX_TRANSLATION_CHUNK: usize = 1000;

/// Source languages with an opus-mt model into English
const TRANSLATABLE_LANGUAGES: &[&str] = &["es", "fr", "de", "it"];

/// Zero-shot responses come in two shapes depending on the API generation
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Parallel { labels: Vec<String>, scores: Vec<f64> },
    Ranked(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct QaResponse {
    answer: String,
    score: f64,
    start: usize,
    end: usize,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

impl ZeroShotResponse {
    fn top(self) -> Option<Classification> {
        let pairs: Vec<(String, f64)> = match self {
            ZeroShotResponse::Parallel { labels, scores } => labels.into_iter().zip(scores).collect(),
            ZeroShotResponse::Ranked(items) => {
                items.into_iter().map(|i| (i.label, i.score)).collect()
            }
        };

        pairs
            .into_iter()
            .filter(|(_, score)| score.is_finite())
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(top_label, score)| Classification {
                top_label,
                score: score.clamp(0.0, 1.0),
            })
    }
}

/// Client for the Hugging Face hosted inference API
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    classifier_model: String,
    qa_model: String,
}

impl HuggingFaceClient {
    /// Create a new client
    ///
    /// Configuration via environment variables:
    /// - `HF_API_TOKEN` - bearer token (optional, anonymous access is heavily rate limited)
    /// - `HF_INFERENCE_BASE_URL` - API base URL
    /// - `HF_CLASSIFIER_MODEL` / `HF_QA_MODEL` - model overrides
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("credence/0.1")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        let token = env::var(ENV_HF_TOKEN).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            tracing::warn!("HF_API_TOKEN not set, using anonymous inference access");
        }

        Self {
            client,
            base_url: env::var(ENV_HF_BASE_URL).unwrap_or_else(|_| HF_INFERENCE_BASE_URL.to_string()),
            token,
            classifier_model: env::var(ENV_CLASSIFIER_MODEL)
                .unwrap_or_else(|_| DEFAULT_CLASSIFIER_MODEL.to_string()),
            qa_model: env::var(ENV_QA_MODEL).unwrap_or_else(|_| DEFAULT_QA_MODEL.to_string()),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        model: &str,
        body: serde_json::Value,
    ) -> Result<T, InferenceError> {
        let mut request = self.client.post(self.model_url(model)).json(&body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::ParseError(e.to_string()))
    }

    async fn translate_chunk(&self, model: &str, chunk: &str) -> Result<String, InferenceError> {
        let outputs: Vec<TranslationOutput> = self
            .post_json(model, serde_json::json!({ "inputs": chunk }))
            .await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.translation_text)
            .ok_or_else(|| InferenceError::ParseError("empty translation response".to_string()))
    }
}

impl Default for HuggingFaceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextClassifier for HuggingFaceClient {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Classification, InferenceError> {
        let body = serde_json::json!({
            "inputs": text,
            "parameters": { "candidate_labels": labels },
        });

        let response: ZeroShotResponse = self.post_json(&self.classifier_model, body).await?;

        response
            .top()
            .ok_or_else(|| InferenceError::ParseError("classification returned no labels".to_string()))
    }
}

#[async_trait]
impl QuestionAnswerer for HuggingFaceClient {
    async fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, InferenceError> {
        let body = serde_json::json!({
            "inputs": { "question": question, "context": context },
        });

        let response: QaResponse = self.post_json(&self.qa_model, body).await?;

        Ok(QaAnswer {
            answer: response.answer,
            score: response.score.clamp(0.0, 1.0),
            start: response.start,
            end: response.end,
        })
    }
}

#[async_trait]
impl LanguageNormalizer for HuggingFaceClient {
    async fn translate_to_english(
        &self,
        text: &str,
        source_language: &str,
    ) -> Result<String, InferenceError> {
        if !TRANSLATABLE_LANGUAGES.contains(&source_language) {
            return Err(InferenceError::UnsupportedLanguage(source_language.to_string()));
        }

        let model = format!("Helsinki-NLP/opus-mt-{}-en", source_language);
        let mut translated = Vec::new();

        for chunk in chunk_text(text, MAX_TRANSLATION_CHUNK) {
            translated.push(self.translate_chunk(&model, &chunk).await?);
        }

        tracing::debug!(
            language = %source_language,
            chunks = translated.len(),
            "Translated text to English"
        );

        Ok(translated.join(" "))
    }
}

#[async_trait]
impl HealthCheck for HuggingFaceClient {
    fn service_name(&self) -> &str {
        "huggingface_inference"
    }

    async fn check(&self) -> Result<(), String> {
        let response = self
            .client
            .head(self.model_url(&self.classifier_model))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_server_error() {
            return Err(format!("HTTP {}", response.status()));
        }
        Ok(())
    }
}

/// Split text into chunks of at most `max_chars`, preferring sentence boundaries
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split_inclusive(['.', '!', '?']) {
        if !current.is_empty() && current.chars().count() + sentence.chars().count() > max_chars {
            chunks.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(sentence);
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

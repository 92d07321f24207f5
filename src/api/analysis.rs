//! REST API endpoints for claim analysis

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::app::AppState;
use crate::model::{
    AnalysisOptions, Claim, ClaimCategory, ComprehensiveAnalysisResult, ExtractionOptions,
    ExtractionResult, FactCheckOptions, FactCheckResult, Source, SourceOptions, TextPosition,
};
use crate::service::claims::segmentation::extract_keywords;
use crate::service::claims::validate_input;

const MAX_CLAIMS_LIMIT: usize = 50;

#[derive(OpenApi)]
#[openapi(
    paths(
        analyze,
        extract_claims,
        generate_sources,
        fact_check,
        crate::api::health::liveness,
        crate::api::health::readiness
    ),
    components(schemas(
        AnalyzeRequest,
        ClaimsRequest,
        SourcesRequest,
        SourcesResponse,
        FactCheckRequest,
        ComprehensiveAnalysisResult,
        ExtractionResult,
        FactCheckResult,
        ErrorResponse
    )),
    tags(
        (name = "analysis", description = "Claim extraction, evidence gathering and credibility scoring"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Text to analyze (50 to 50000 characters)
    pub text: String,
    #[serde(default)]
    pub options: AnalysisOptions,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClaimsRequest {
    pub text: String,
    #[serde(default)]
    pub options: ExtractionOptions,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SourcesRequest {
    pub text: String,
    #[serde(default)]
    pub options: SourceOptions,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SourcesResponse {
    pub sources: Vec<Source>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FactCheckRequest {
    /// Claim statement to assess
    pub claim: String,
    #[serde(default)]
    pub options: FactCheckOptions,
}

/// Run the full analysis pipeline over a text
#[utoipa::path(
    post,
    path = "/v1/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = ComprehensiveAnalysisResult),
        (status = 400, description = "Invalid text or options", body = ErrorResponse),
        (status = 500, description = "A pipeline stage failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/v1/analyze")]
pub async fn analyze(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    validate_claim_limits(request.options.max_claims, request.options.min_confidence)?;

    tracing::info!(
        text_length = request.text.chars().count(),
        search_databases = request.options.search_databases,
        deep_analysis = request.options.deep_analysis,
        "Received analysis request"
    );

    let result = state.analysis.analyze(&request.text, &request.options).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Extract ranked claims from a text
#[utoipa::path(
    post,
    path = "/v1/claims",
    request_body = ClaimsRequest,
    responses(
        (status = 200, description = "Claims extracted", body = ExtractionResult),
        (status = 400, description = "Invalid text or options", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/v1/claims")]
pub async fn extract_claims(
    state: web::Data<AppState>,
    body: web::Json<ClaimsRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    validate_claim_limits(request.options.max_claims, request.options.min_confidence)?;

    let result = state.claims.extract_claims(&request.text, &request.options).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Gather, verify and rank evidence sources for a text
#[utoipa::path(
    post,
    path = "/v1/sources",
    request_body = SourcesRequest,
    responses(
        (status = 200, description = "Sources generated", body = SourcesResponse),
        (status = 400, description = "Invalid text or options", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/v1/sources")]
pub async fn generate_sources(
    state: web::Data<AppState>,
    body: web::Json<SourcesRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    validate_input(&request.text)?;
    validate_source_options(&request.options)?;

    let sources = state
        .sources
        .generate_sources(&request.text, &request.options)
        .await;
    Ok(HttpResponse::Ok().json(SourcesResponse { sources }))
}

/// Score the credibility of a single claim
#[utoipa::path(
    post,
    path = "/v1/fact-check",
    request_body = FactCheckRequest,
    responses(
        (status = 200, description = "Claim assessed", body = FactCheckResult),
        (status = 400, description = "Invalid claim or options", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/v1/fact-check")]
pub async fn fact_check(
    state: web::Data<AppState>,
    body: web::Json<FactCheckRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    if request.claim.trim().is_empty() {
        return Err(ApiError::BadRequest("claim must not be empty".to_string()));
    }
    validate_unit("min_source_reliability", request.options.min_source_reliability)?;
    validate_source_options(&request.options.sources)?;

    let claim = standalone_claim(state.ids.next_id(), &request.claim);
    let result = state
        .credibility
        .fact_check_claim(&claim, &request.options, None)
        .await;
    Ok(HttpResponse::Ok().json(result))
}

/// Wrap a caller-supplied statement as a claim spanning the whole text
fn standalone_claim(id: String, text: &str) -> Claim {
    let text = text.trim();
    Claim {
        id,
        text: text.to_string(),
        confidence: 1.0,
        category: ClaimCategory::Factual,
        context: text.to_string(),
        position: TextPosition {
            start: 0,
            end: text.chars().count(),
        },
        keywords: extract_keywords(text),
    }
}

fn validate_claim_limits(max_claims: usize, min_confidence: f64) -> Result<(), ApiError> {
    if !(1..=MAX_CLAIMS_LIMIT).contains(&max_claims) {
        return Err(ApiError::BadRequest(format!(
            "max_claims must be between 1 and {}, got {}",
            MAX_CLAIMS_LIMIT, max_claims
        )));
    }
    validate_unit("min_confidence", min_confidence)
}

fn validate_source_options(options: &SourceOptions) -> Result<(), ApiError> {
    if options.max_sources == 0 {
        return Err(ApiError::BadRequest(
            "max_sources must be at least 1".to_string(),
        ));
    }
    validate_unit("min_reliability", options.min_reliability)
}

fn validate_unit(field: &str, value: f64) -> Result<(), ApiError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ApiError::BadRequest(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze)
        .service(extract_claims)
        .service(generate_sources)
        .service(fact_check);
}

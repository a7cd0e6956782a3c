//! Claim scoring and statement check endpoints

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::authorization;
use crate::api::error::{ApiError, ErrorResponse, require_text};
use crate::model::{ActivityKind, ClaimAnalysis, StatementCheck};
use crate::service::statement::check_statement;
use crate::service::{ActivityService, ClaimScorer};

const TEXT_REQUIRED: &str = "Text is required";
const STATEMENT_REQUIRED: &str = "Statement is required";

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Claim or snippet to score
    #[serde(alias = "claim")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatementRequest {
    pub statement: Option<String>,
}

/// Score a claim
#[utoipa::path(
    post,
    path = "/fact-check/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Claim scored", body = ClaimAnalysis),
        (status = 400, description = "Missing text", body = ErrorResponse)
    ),
    tag = "fact-check"
)]
#[post("/fact-check/analyze")]
pub async fn analyze(
    scorer: web::Data<ClaimScorer>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = require_text(body.into_inner().text, TEXT_REQUIRED)?;
    Ok(HttpResponse::Ok().json(scorer.analyze(&text)))
}

/// Score a claim and record a fact-check activity for signed-in callers
#[utoipa::path(
    post,
    path = "/api/fact-check",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Claim scored", body = ClaimAnalysis),
        (status = 400, description = "Missing text", body = ErrorResponse)
    ),
    tag = "fact-check"
)]
#[post("/api/fact-check")]
pub async fn fact_check(
    req: HttpRequest,
    scorer: web::Data<ClaimScorer>,
    activity: web::Data<ActivityService>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let text = require_text(body.into_inner().text, TEXT_REQUIRED)?;
    let analysis = scorer.analyze(&text);
    activity
        .record_usage(authorization(&req), ActivityKind::FactCheck)
        .await;
    Ok(HttpResponse::Ok().json(analysis))
}

/// Check a statement against known talking points and store the result
#[utoipa::path(
    post,
    path = "/api/check-fact",
    request_body = StatementRequest,
    responses(
        (status = 200, description = "Statement checked", body = StatementCheck),
        (status = 400, description = "Missing statement", body = ErrorResponse)
    ),
    tag = "fact-check"
)]
#[post("/api/check-fact")]
pub async fn check_fact(
    activity: web::Data<ActivityService>,
    body: web::Json<StatementRequest>,
) -> Result<HttpResponse, ApiError> {
    let statement = require_text(body.into_inner().statement, STATEMENT_REQUIRED)?;
    let check = check_statement(&statement);
    tracing::debug!(id = %check.id, verdict = check.verdict.as_str(), "Checked statement");
    activity.record_statement_check(&check).await;
    Ok(HttpResponse::Ok().json(check))
}

/// Configure fact-check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(fact_check).service(check_fact);
}

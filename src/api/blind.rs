//! Blind-read endpoints

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::authorization;
use crate::api::error::{ApiError, ErrorResponse, require_text};
use crate::model::ActivityKind;
use crate::service::{ActivityService, AnonymizerRegistry};

const NO_TEXT: &str = "No text provided";

#[derive(Debug, Deserialize, ToSchema)]
pub struct BlindRequest {
    /// Text to anonymize
    pub text: Option<String>,
    /// Ruleset name (defaults to the configured ruleset)
    pub ruleset: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlindResponse {
    pub blind_text: String,
}

fn anonymize(
    registry: &AnonymizerRegistry,
    request: BlindRequest,
) -> Result<BlindResponse, ApiError> {
    let text = require_text(request.text, NO_TEXT)?;
    let anonymizer = registry.get(request.ruleset.as_deref())?;
    let result = anonymizer.process(&text);
    Ok(BlindResponse {
        blind_text: result.blind_text,
    })
}

/// Anonymize text and record a blind-read activity for signed-in callers
#[utoipa::path(
    post,
    path = "/blind/process",
    request_body = BlindRequest,
    responses(
        (status = 200, description = "Text anonymized", body = BlindResponse),
        (status = 400, description = "Missing text or unknown ruleset", body = ErrorResponse)
    ),
    tag = "blind"
)]
#[post("/blind/process")]
pub async fn blind_process(
    req: HttpRequest,
    registry: web::Data<AnonymizerRegistry>,
    activity: web::Data<ActivityService>,
    body: web::Json<BlindRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = anonymize(&registry, body.into_inner())?;
    activity
        .record_usage(authorization(&req), ActivityKind::BlindRead)
        .await;
    Ok(HttpResponse::Ok().json(response))
}

/// Anonymize text without activity logging
#[utoipa::path(
    post,
    path = "/process",
    request_body = BlindRequest,
    responses(
        (status = 200, description = "Text anonymized", body = BlindResponse),
        (status = 400, description = "Missing text or unknown ruleset", body = ErrorResponse)
    ),
    tag = "blind"
)]
#[post("/process")]
pub async fn process(
    registry: web::Data<AnonymizerRegistry>,
    body: web::Json<BlindRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = anonymize(&registry, body.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configure blind-read routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(blind_process).service(process);
}

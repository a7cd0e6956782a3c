//! OpenAPI specification endpoints

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::api::error::ApiError;
use crate::api::{activity, blind, chat, error, fact_check, health};
use crate::model::{Activity, ActivityKind, ClaimAnalysis, StatementCheck, StatementVerdict, Verdict};

#[derive(OpenApi)]
#[openapi(
    paths(
        blind::blind_process,
        blind::process,
        fact_check::analyze,
        fact_check::fact_check,
        fact_check::check_fact,
        chat::chat_message,
        chat::assistant,
        activity::recent_activity,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        blind::BlindRequest,
        blind::BlindResponse,
        fact_check::AnalyzeRequest,
        fact_check::StatementRequest,
        chat::ChatRequest,
        chat::ChatResponse,
        chat::AssistantResponse,
        activity::ActivityList,
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth,
        error::ErrorResponse,
        ClaimAnalysis,
        Verdict,
        StatementCheck,
        StatementVerdict,
        Activity,
        ActivityKind,
    )),
    tags(
        (name = "blind", description = "Partisan-term anonymization"),
        (name = "fact-check", description = "Heuristic claim scoring"),
        (name = "chat", description = "Civic-information chatbot"),
        (name = "activity", description = "Per-user usage history"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;
    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/blind/process",
            "/process",
            "/fact-check/analyze",
            "/api/fact-check",
            "/api/check-fact",
            "/chat/message",
            "/api/chat",
            "/api/activity",
            "/health/live",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}

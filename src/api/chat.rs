//! Chatbot endpoints

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::authorization;
use crate::api::error::{ApiError, ErrorResponse, require_text};
use crate::model::ActivityKind;
use crate::service::anonymizer::Anonymizer;
use crate::service::chat::{ASSISTANT_RULESET, render};
use crate::service::{ActivityService, AnonymizerRegistry, ChatService};

const MESSAGE_REQUIRED: &str = "Message is required";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Anonymize the answer before returning it
    #[serde(default)]
    pub blind: bool,
    /// Ruleset for blind mode; each endpoint has its own default
    pub ruleset: Option<String>,
}

impl ChatRequest {
    fn blind_ruleset<'a>(
        &self,
        registry: &'a AnonymizerRegistry,
        fallback: Option<&str>,
    ) -> Result<Option<&'a Anonymizer>, ApiError> {
        if !self.blind {
            return Ok(None);
        }
        let name = self.ruleset.as_deref().or(fallback);
        Ok(Some(registry.get(name)?))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssistantResponse {
    pub reply: String,
}

/// Answer from the keyword knowledge base
#[utoipa::path(
    post,
    path = "/chat/message",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Answer found", body = ChatResponse),
        (status = 400, description = "Missing message or unknown ruleset", body = ErrorResponse)
    ),
    tag = "chat"
)]
#[post("/chat/message")]
pub async fn chat_message(
    chat: web::Data<ChatService>,
    registry: web::Data<AnonymizerRegistry>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let message = require_text(request.message.clone(), MESSAGE_REQUIRED)?;
    let blind = request.blind_ruleset(&registry, None)?;

    let response = render(chat.answer(&message), blind);

    Ok(HttpResponse::Ok().json(ChatResponse { response }))
}

/// Topic-guarded assistant; records chatbot use for signed-in callers.
/// Blind mode uses the `chatbot` ruleset unless the request names another.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = AssistantResponse),
        (status = 400, description = "Missing message or unknown ruleset", body = ErrorResponse)
    ),
    tag = "chat"
)]
#[post("/api/chat")]
pub async fn assistant(
    req: HttpRequest,
    chat: web::Data<ChatService>,
    registry: web::Data<AnonymizerRegistry>,
    activity: web::Data<ActivityService>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let message = require_text(request.message.clone(), MESSAGE_REQUIRED)?;
    let blind = request.blind_ruleset(&registry, Some(ASSISTANT_RULESET))?;

    activity
        .record_usage(authorization(&req), ActivityKind::ChatbotUse)
        .await;

    let reply = render(chat.assist(&message), blind);

    Ok(HttpResponse::Ok().json(AssistantResponse { reply }))
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat_message).service(assistant);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::app::AppState;
    use crate::model::ActivityKind;
    use crate::service::activity::testing::MemoryActivityStore;
    use crate::service::auth::issue_token;

    #[actix_web::test]
    async fn test_chat_message_lookup() {
        let state = AppState::for_tests(None);
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.configure(cfg))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat/message")
            .set_json(json!({ "message": "Tell me the history" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let response = body["response"].as_str().unwrap();
        assert!(response.starts_with("India actually had simultaneous elections"));
    }

    #[actix_web::test]
    async fn test_chat_message_blind() {
        let state = AppState::for_tests(None);
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.configure(cfg))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/chat/message")
            .set_json(json!({ "message": "Tell me the history", "blind": true }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let response = body["response"].as_str().unwrap();
        assert!(response.starts_with("the country actually had simultaneous elections"));
    }

    #[actix_web::test]
    async fn test_assistant_blind_uses_chatbot_ruleset() {
        let state = AppState::for_tests(None);
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.configure(cfg))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({ "message": "What is the legal basis?", "blind": true }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["reply"]
            .as_str()
            .unwrap()
            .starts_with("ONOE requires changes to Articles 83 and 172."));

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({
                "message": "What is the legal basis?",
                "blind": true,
                "ruleset": "nope"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_missing_message() {
        let state = AppState::for_tests(None);
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.configure(cfg))
                .configure(crate::api::configure),
        )
        .await;

        for uri in ["/chat/message", "/api/chat"] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(json!({ "blind": true }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Message is required");
        }
    }

    #[actix_web::test]
    async fn test_assistant_reply_and_logging() {
        let store = Arc::new(MemoryActivityStore::default());
        let state = AppState::for_tests(Some(store.clone()));
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.configure(cfg))
                .configure(crate::api::configure),
        )
        .await;

        let token = issue_token(AppState::TEST_JWT_SECRET, "voter", 600);
        let req = test::TestRequest::post()
            .uri("/api/chat")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "message": "What's the weather like?" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["reply"],
            "I focus on ONOE facts. How can I help you with election data?"
        );

        let logged = store.activities();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].kind, ActivityKind::ChatbotUse);
    }
}

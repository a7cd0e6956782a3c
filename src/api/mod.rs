//! HTTP surface

pub mod activity;
pub mod blind;
pub mod chat;
pub mod error;
pub mod fact_check;
pub mod health;
pub mod openapi;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, http::header, web};

use error::ApiError;

/// Raw `Authorization` header value, if present and valid UTF-8
pub fn authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

/// Register every route and the JSON body configuration
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .configure(blind::configure)
        .configure(fact_check::configure)
        .configure(chat::configure)
        .configure(activity::configure)
        .configure(health::configure)
        .configure(openapi::configure);
}

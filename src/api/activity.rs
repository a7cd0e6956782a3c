//! Activity history for signed-in users

use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::authorization;
use crate::api::error::{ApiError, ErrorResponse};
use crate::model::Activity;
use crate::service::ActivityService;

const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityQuery {
    /// Maximum number of entries (default 10)
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityList {
    pub activities: Vec<Activity>,
}

/// Most recent activities of the caller, newest first
#[utoipa::path(
    get,
    path = "/api/activity",
    params(ActivityQuery),
    responses(
        (status = 200, description = "Recent activities", body = ActivityList),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "activity"
)]
#[get("/api/activity")]
pub async fn recent_activity(
    req: HttpRequest,
    activity: web::Data<ActivityService>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let activities = activity.recent_for(authorization(&req), limit).await?;
    Ok(HttpResponse::Ok().json(ActivityList { activities }))
}

/// Configure activity routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(recent_activity);
}

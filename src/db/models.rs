//! Database models for activity records

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::model::{Activity, ActivityKind};

/// Database representation of an activity
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: Uuid,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> Result<Activity, String> {
        let kind = ActivityKind::parse(&self.kind)
            .ok_or_else(|| format!("Unknown activity kind: {}", self.kind))?;

        Ok(Activity {
            id: self.id,
            user_id: self.user_id,
            kind,
            title: self.title,
            url: self.url,
            created_at: self.created_at,
        })
    }
}

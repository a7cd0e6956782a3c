//! Repository for activity and fact-check records

use async_trait::async_trait;
use sqlx::PgPool;

use super::DbError;
use super::models::ActivityRow;
use crate::model::{Activity, StatementCheck};
use crate::service::activity::ActivityStore;

const MAX_RECENT: u32 = 50;

/// PostgreSQL-backed activity store
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn record_activity(&self, activity: &Activity) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, user_id, kind, title, url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(activity.id)
        .bind(&activity.user_id)
        .bind(activity.kind.as_str())
        .bind(&activity.title)
        .bind(&activity.url)
        .bind(activity.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %activity.id, "Inserted activity");
        Ok(())
    }

    async fn record_statement_check(&self, check: &StatementCheck) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO fact_checks (id, statement, verdict, explanation, source, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(check.id)
        .bind(&check.statement)
        .bind(check.verdict.as_str())
        .bind(&check.explanation)
        .bind(&check.source)
        .bind(check.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %check.id, "Inserted fact check");
        Ok(())
    }

    async fn recent_activities(&self, user_id: &str, limit: u32) -> Result<Vec<Activity>, DbError> {
        let limit = i64::from(limit.min(MAX_RECENT));

        let rows: Vec<ActivityRow> = sqlx::query_as(
            r#"
            SELECT * FROM activities
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(DbError::Serialization))
            .collect()
    }
}

//! Usage logging for authenticated callers

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::DbError;
use crate::model::{Activity, ActivityKind, StatementCheck};
use crate::service::auth::TokenVerifier;

/// Persistence collaborator for usage records
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn record_activity(&self, activity: &Activity) -> Result<(), DbError>;

    async fn record_statement_check(&self, check: &StatementCheck) -> Result<(), DbError>;

    /// Newest first
    async fn recent_activities(&self, user_id: &str, limit: u32) -> Result<Vec<Activity>, DbError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityServiceError {
    #[error("Not authorized")]
    Unauthorized,

    #[error(transparent)]
    Db(#[from] DbError),
}

/// Resolves the caller and writes usage records. Every part is optional:
/// without a store nothing is written, without a verifier callers are anonymous.
#[derive(Clone, Default)]
pub struct ActivityService {
    store: Option<Arc<dyn ActivityStore>>,
    verifier: Option<TokenVerifier>,
}

impl ActivityService {
    pub fn new(store: Option<Arc<dyn ActivityStore>>, verifier: Option<TokenVerifier>) -> Self {
        Self { store, verifier }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Record a feature use if the `Authorization` header identifies a user.
    /// Returns the recorded activity; anonymous callers are skipped silently.
    pub async fn record_usage(
        &self,
        authorization: Option<&str>,
        kind: ActivityKind,
    ) -> Option<Activity> {
        let store = self.store.as_ref()?;
        let user_id = self.verifier.as_ref()?.user_id(authorization)?;

        let activity = Activity::new(user_id, kind);
        match store.record_activity(&activity).await {
            Ok(()) => {
                tracing::debug!(
                    user_id = %activity.user_id,
                    kind = activity.kind.as_str(),
                    "Recorded activity"
                );
                Some(activity)
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = kind.as_str(), "Failed to record activity");
                None
            }
        }
    }

    /// The caller's most recent activities; requires a valid bearer token
    pub async fn recent_for(
        &self,
        authorization: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Activity>, ActivityServiceError> {
        let user_id = self
            .verifier
            .as_ref()
            .and_then(|v| v.user_id(authorization))
            .ok_or(ActivityServiceError::Unauthorized)?;

        match self.store.as_ref() {
            Some(store) => Ok(store.recent_activities(&user_id, limit).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn record_statement_check(&self, check: &StatementCheck) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        if let Err(e) = store.record_statement_check(check).await {
            tracing::warn!(error = %e, id = %check.id, "Failed to record statement check");
        }
    }
}

//! Application state and service initialization
//!
//! Builds every engine once at startup and hands them to actix-web as shared
//! `web::Data`. Persistence is optional: the engines never touch it.

use std::sync::Arc;

use actix_web::web;
use sqlx::PgPool;

use crate::db::DbError;
use crate::db::repository::ActivityRepository;
use crate::model::{Config, DatabaseConfig};
use crate::service::anonymizer::AnonymizerError;
use crate::service::chat::ChatServiceError;
use crate::service::{
    ActivityService, ActivityStore, AnonymizerRegistry, ChatService, ClaimScorer, TokenVerifier,
};

/// Application state containing all services and shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, absent when persistence is disabled or unreachable
    pub db_pool: Option<PgPool>,
    pub anonymizers: web::Data<AnonymizerRegistry>,
    pub scorer: web::Data<ClaimScorer>,
    pub chat: web::Data<ChatService>,
    pub activity: web::Data<ActivityService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Ruleset compilation (built-ins plus config overrides)
    /// 2. Claim scorer and knowledge base loading
    /// 3. Optional database connection and schema initialization
    /// 4. Token verifier setup from `JWT_SECRET`
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let anonymizers = AnonymizerRegistry::with_overrides(config.anonymizer)?;
        let scorer = ClaimScorer::new()?;
        let chat = ChatService::builtin()?;

        let db_pool = if config.database.enabled {
            match Self::connect_database(&config.database).await {
                Ok(pool) => Some(pool),
                Err(e) => {
                    tracing::warn!(error = %e, "Database unavailable, activity logging disabled");
                    None
                }
            }
        } else {
            tracing::info!("Database disabled by configuration");
            None
        };

        let verifier = match config.jwt_secret.as_deref() {
            Some(secret) => Some(TokenVerifier::new(secret)),
            None => {
                tracing::warn!("JWT_SECRET not set, all callers are treated as anonymous");
                None
            }
        };

        let store = db_pool
            .clone()
            .map(|pool| Arc::new(ActivityRepository::new(pool)) as Arc<dyn ActivityStore>);

        let activity = ActivityService::new(store, verifier);
        if activity.is_enabled() {
            tracing::info!("Activity logging enabled");
        }

        Ok(Self {
            db_pool,
            anonymizers: web::Data::new(anonymizers),
            scorer: web::Data::new(scorer),
            chat: web::Data::new(chat),
            activity: web::Data::new(activity),
        })
    }

    async fn connect_database(settings: &DatabaseConfig) -> Result<PgPool, DbError> {
        let pool = crate::db::create_pool(settings).await?;
        crate::db::init_schema(&pool).await?;
        Ok(pool)
    }

    /// Register shared state on an app or scope
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.db_pool.clone()))
            .app_data(self.anonymizers.clone())
            .app_data(self.scorer.clone())
            .app_data(self.chat.clone())
            .app_data(self.activity.clone());
    }
}

#[cfg(test)]
impl AppState {
    pub const TEST_JWT_SECRET: &'static str = "electify-test-secret";

    /// Built-in engines with an optional in-memory store and a fixed token secret
    pub fn for_tests(
        store: Option<Arc<crate::service::activity::testing::MemoryActivityStore>>,
    ) -> Self {
        let store = store.map(|s| s as Arc<dyn ActivityStore>);
        let verifier = Some(TokenVerifier::new(Self::TEST_JWT_SECRET));

        Self {
            db_pool: None,
            anonymizers: web::Data::new(AnonymizerRegistry::builtin().unwrap()),
            scorer: web::Data::new(ClaimScorer::new().unwrap()),
            chat: web::Data::new(ChatService::builtin().unwrap()),
            activity: web::Data::new(ActivityService::new(store, verifier)),
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// A ruleset failed validation or compilation
    #[error("Anonymizer initialization failed: {0}")]
    Anonymizer(#[from] AnonymizerError),

    /// The knowledge base could not be parsed
    #[error("Chat initialization failed: {0}")]
    Chat(#[from] ChatServiceError),

    /// A built-in pattern failed to compile
    #[error("Claim scorer initialization failed: {0}")]
    Scorer(#[from] regex::Error),
}

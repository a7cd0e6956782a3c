pub mod activity;
pub mod anonymizer;
pub mod auth;
pub mod chat;
pub mod claim_scorer;
pub mod matching;
pub mod signals;
pub mod statement;

pub use activity::{ActivityService, ActivityStore};
pub use anonymizer::AnonymizerRegistry;
pub use auth::TokenVerifier;
pub use chat::ChatService;
pub use claim_scorer::ClaimScorer;

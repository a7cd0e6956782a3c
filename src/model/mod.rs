pub mod activity;
pub mod anonymize;
pub mod chat;
pub mod claims;
pub mod config;

pub use activity::{Activity, ActivityKind, StatementCheck, StatementVerdict};
pub use anonymize::{AnonymizationResult, ReplacementRule, RulesetDefinition, RulesetTable};
pub use chat::KnowledgeBase;
pub use claims::{ClaimAnalysis, ClaimSignals, Verdict};
pub use config::{Config, DatabaseConfig};

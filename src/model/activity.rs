//! Activity and fact-check records handed to the persistence layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    BlindRead,
    FactCheck,
    ChatbotUse,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::BlindRead => "BLIND_READ",
            ActivityKind::FactCheck => "FACT_CHECK",
            ActivityKind::ChatbotUse => "CHATBOT_USE",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActivityKind::BlindRead => "Used Blind Mode Reader",
            ActivityKind::FactCheck => "Used Fact Checker",
            ActivityKind::ChatbotUse => "Used Chatbot",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            ActivityKind::BlindRead => "/blind-mode",
            ActivityKind::FactCheck => "/fact-check",
            ActivityKind::ChatbotUse => "/chatbot",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BLIND_READ" => Some(ActivityKind::BlindRead),
            "FACT_CHECK" => Some(ActivityKind::FactCheck),
            "CHATBOT_USE" => Some(ActivityKind::ChatbotUse),
            _ => None,
        }
    }
}

/// A feature-usage record owned by an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(user_id: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            kind,
            title: kind.title().to_string(),
            url: kind.url().to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StatementVerdict {
    True,
    False,
    Unverified,
}

impl StatementVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementVerdict::True => "True",
            StatementVerdict::False => "False",
            StatementVerdict::Unverified => "Unverified",
        }
    }
}

/// Result of the automated statement check, persisted as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatementCheck {
    pub id: Uuid,
    pub statement: String,
    pub verdict: StatementVerdict,
    pub explanation: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

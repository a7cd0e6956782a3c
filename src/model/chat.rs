//! Chatbot knowledge base

use serde::Deserialize;

/// One keyword-indexed answer.
///
/// Matches a lowercased message when every `all` keyword is contained and,
/// if `any` is non-empty, at least one `any` keyword is contained.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(default)]
    pub all: Vec<String>,
    #[serde(default)]
    pub any: Vec<String>,
    pub response: String,
}

impl KnowledgeEntry {
    pub fn matches(&self, lowered: &str) -> bool {
        if self.all.is_empty() && self.any.is_empty() {
            return false;
        }
        self.all.iter().all(|k| lowered.contains(k.as_str()))
            && (self.any.is_empty() || self.any.iter().any(|k| lowered.contains(k.as_str())))
    }
}

/// Answers for `/chat/message`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageBase {
    pub default: String,
    pub entries: Vec<KnowledgeEntry>,
}

/// Relevance test used by the assistant before it falls back to the
/// general knowledge base
#[derive(Debug, Clone, Deserialize)]
pub struct TopicGuard {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub min_secondary: usize,
}

impl TopicGuard {
    pub fn is_related(&self, lowered: &str) -> bool {
        if self.primary.iter().any(|k| lowered.contains(k.as_str())) {
            return true;
        }
        let hits = self
            .secondary
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count();
        hits >= self.min_secondary
    }
}

/// Answers for `/api/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantBase {
    pub off_topic: String,
    pub entries: Vec<KnowledgeEntry>,
    pub topic: TopicGuard,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    pub message: MessageBase,
    pub assistant: AssistantBase,
}

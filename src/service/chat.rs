//! Rule-based civic chatbot

use crate::model::KnowledgeBase;
use crate::service::anonymizer::Anonymizer;

/// Ruleset the assistant applies in blind mode
pub const ASSISTANT_RULESET: &str = "chatbot";

const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("../../assets/knowledge_base.yaml");

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("Invalid knowledge base: {0}")]
    KnowledgeBase(#[from] serde_yaml::Error),
}

/// Keyword lookup over a fixed, ordered knowledge base
#[derive(Debug, Clone)]
pub struct ChatService {
    knowledge: KnowledgeBase,
}

impl ChatService {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self { knowledge }
    }

    pub fn builtin() -> Result<Self, ChatServiceError> {
        Ok(Self::new(serde_yaml::from_str(BUILTIN_KNOWLEDGE_BASE)?))
    }

    /// `/chat/message`: first matching entry, else the default answer
    pub fn answer(&self, message: &str) -> &str {
        let lowered = message.to_lowercase();
        self.lookup(&lowered)
    }

    /// `/api/chat`: assistant rules, then the topic guard, then the general lookup
    pub fn assist(&self, message: &str) -> &str {
        let lowered = message.to_lowercase();
        let assistant = &self.knowledge.assistant;

        if let Some(entry) = assistant.entries.iter().find(|e| e.matches(&lowered)) {
            return &entry.response;
        }

        if !assistant.topic.is_related(&lowered) {
            tracing::debug!("Chat message is off topic");
            return &assistant.off_topic;
        }

        self.lookup(&lowered)
    }

    fn lookup(&self, lowered: &str) -> &str {
        let base = &self.knowledge.message;
        base.entries
            .iter()
            .find(|e| e.matches(lowered))
            .map(|e| e.response.as_str())
            .unwrap_or(&base.default)
    }
}

/// Pipe a chatbot answer through the anonymizer when blind mode is on
pub fn render(reply: &str, blind: Option<&Anonymizer>) -> String {
    match blind {
        Some(anonymizer) => anonymizer.anonymize(reply),
        None => reply.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::anonymizer::AnonymizerRegistry;

    fn service() -> ChatService {
        ChatService::builtin().unwrap()
    }

    #[test]
    fn test_what_requires_both_keywords() {
        let chat = service();
        assert!(chat.answer("What is ONOE?").starts_with("One Nation One Election (ONOE) refers"));
        // "what" alone falls through to later entries or the default
        assert!(chat.answer("what is this").starts_with("That's an interesting question!"));
    }

    #[test]
    fn test_first_match_wins() {
        let chat = service();
        // Matches both the history entry and the cost entry; history is declared first
        assert!(chat
            .answer("When did the cost debate start?")
            .starts_with("India actually had simultaneous elections"));
        assert!(chat.answer("Is it expensive").starts_with("While ONOE may reduce"));
        assert!(chat.answer("Any legal issues?").starts_with("The Indian Constitution"));
        assert!(chat.answer("main CHALLENGES").starts_with("Critics raise"));
        assert!(chat.answer("advantages?").starts_with("Proponents argue"));
    }

    #[test]
    fn test_default_answer() {
        assert!(service().answer("hello").starts_with("That's an interesting question!"));
    }

    #[test]
    fn test_assistant_rules_come_first() {
        let chat = service();
        assert!(chat
            .assist("Which article changes?")
            .starts_with("ONOE requires changes to Articles 83 and 172."));
        assert!(chat
            .assist("what is the current status")
            .starts_with("The Kovind Committee submitted its report"));
    }

    #[test]
    fn test_assistant_topic_guard() {
        let chat = service();
        assert_eq!(
            chat.assist("recommend a movie"),
            "I focus on ONOE facts. How can I help you with election data?"
        );
        // One secondary term is not enough
        assert_eq!(
            chat.assist("tell me about voting"),
            "I focus on ONOE facts. How can I help you with election data?"
        );
        // Two secondary terms are
        assert!(chat
            .assist("voting in the assembly election")
            .starts_with("That's an interesting question!"));
        assert!(chat
            .assist("benefits of simultaneous elections")
            .starts_with("Proponents argue"));
    }

    #[test]
    fn test_blind_rendering() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        let chat = service();
        let reply = chat.answer("What is ONOE?");
        let blind = render(reply, Some(registry.default_anonymizer()));
        assert!(!blind.contains("India"));
        assert!(blind.contains("the country"));
        assert_eq!(render(reply, None), reply);
    }

    #[test]
    fn test_assistant_ruleset() {
        let registry = AnonymizerRegistry::builtin().unwrap();
        let chatbot = registry.get(Some(ASSISTANT_RULESET)).unwrap();
        assert_eq!(
            render("Narendra Modi and Rahul Gandhi debated; BJP, BSP and AITC joined", Some(chatbot)),
            "Leader Y and Leader Y debated; Party X, Party X and Party X joined"
        );
    }
}

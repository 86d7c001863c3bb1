//! HTTP DTOs for chat endpoints.
//!
//! JSON field names are camelCase; timestamps are RFC 3339 strings.

use serde::{Deserialize, Serialize};

use crate::application::handlers::conversation::{ConversationHistory, HandleQueryResult};
use crate::domain::conversation::{Conversation, Message, Role};
use crate::domain::foundation::ConversationId;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Question for the assistant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    /// Omitted or null starts a new conversation.
    #[serde(default)]
    pub conversation_id: Option<ConversationId>,
}

impl QueryRequest {
    /// The question, if it has any non-whitespace content.
    pub fn question(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub answer: String,
    pub conversation_id: String,
    /// Id of the assistant message.
    pub message_id: String,
    pub conversation_title: String,
}

impl From<HandleQueryResult> for QueryResponse {
    fn from(result: HandleQueryResult) -> Self {
        Self {
            answer: result.answer,
            conversation_id: result.conversation_id.to_string(),
            message_id: result.message_id.to_string(),
            conversation_title: result.conversation_title,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().to_string(),
            title: conversation.title().as_str().to_string(),
            created_at: conversation.created_at().as_datetime().to_rfc3339(),
            updated_at: conversation.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub conversations: Vec<ConversationResponse>,
    pub total_conversations: usize,
}

impl From<ConversationHistory> for HistoryResponse {
    fn from(history: ConversationHistory) -> Self {
        Self {
            total_conversations: history.total(),
            conversations: history.conversations.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: String,
    /// `USER`, `ASSISTANT` or `SYSTEM`.
    pub role: &'static str,
    pub content: String,
    pub created_at: String,
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "USER",
        Role::Assistant => "ASSISTANT",
        Role::System => "SYSTEM",
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            role: role_label(message.role()),
            content: message.content().to_string(),
            created_at: message.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationTitle;
    use crate::domain::foundation::UserId;

    #[test]
    fn query_request_accepts_missing_and_null_conversation() {
        let missing: QueryRequest =
            serde_json::from_value(serde_json::json!({"query": "Hi"})).unwrap();
        let null: QueryRequest =
            serde_json::from_value(serde_json::json!({"query": "Hi", "conversationId": null}))
                .unwrap();

        assert!(missing.conversation_id.is_none());
        assert!(null.conversation_id.is_none());
        assert_eq!(missing.question(), Some("Hi"));
    }

    #[test]
    fn blank_query_has_no_question() {
        let request: QueryRequest =
            serde_json::from_value(serde_json::json!({"query": "  \t"})).unwrap();
        assert_eq!(request.question(), None);
        assert_eq!(QueryRequest::default().question(), None);
    }

    #[test]
    fn message_roles_are_upper_case() {
        let mut conversation =
            Conversation::start(UserId::new(), ConversationTitle::from_question("Q"));
        let message = conversation.append(Role::Assistant, "A", None).unwrap();

        let json = serde_json::to_value(MessageResponse::from(&message)).unwrap();

        assert_eq!(json["role"], "ASSISTANT");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn history_counts_conversations() {
        let conversation =
            Conversation::start(UserId::new(), ConversationTitle::from_question("Q"));
        let history = HistoryResponse::from(ConversationHistory {
            conversations: vec![conversation],
        });

        let json = serde_json::to_value(history).unwrap();

        assert_eq!(json["totalConversations"], 1);
        assert_eq!(json["conversations"][0]["title"], "Q");
    }
}

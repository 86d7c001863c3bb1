//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges. They are only
//! created through [`super::Conversation::append`], which keeps their
//! timestamps ordered within the conversation.

use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, MessageId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Question asked by the user.
    User,
    /// Answer produced by the answer service (or the fallback text).
    Assistant,
    /// Instructions that are stored but never asked by a person.
    System,
}

impl Role {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown message role: {}", other),
            )),
        }
    }
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty
/// - `created_at` never changes after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    role: Role,
    content: String,
    created_at: Timestamp,
    /// Tokens the answer service reported for producing this message.
    tokens_used: Option<u32>,
}

impl Message {
    pub(super) fn new(
        conversation_id: ConversationId,
        role: Role,
        content: String,
        created_at: Timestamp,
        tokens_used: Option<u32>,
    ) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Message content cannot be empty",
            )
            .with_detail("field", "content"));
        }

        Ok(Self {
            id: MessageId::new(),
            conversation_id,
            role,
            content,
            created_at,
            tokens_used,
        })
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        conversation_id: ConversationId,
        role: Role,
        content: String,
        created_at: Timestamp,
        tokens_used: Option<u32>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            role,
            content,
            created_at,
            tokens_used,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn tokens_used(&self) -> Option<u32> {
        self.tokens_used
    }
}

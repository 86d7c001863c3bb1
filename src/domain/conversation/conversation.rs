//! Conversation aggregate.
//!
//! A conversation belongs to exactly one user for its whole life. Messages
//! are appended through the aggregate so that `updated_at` tracks the latest
//! message and message timestamps never go backwards, even if the wall clock
//! does.

use crate::domain::foundation::{
    ConversationId, DomainError, Timestamp, UserId,
};

use super::{ConversationTitle, Message, Role};

/// # Invariants
///
/// - `owner_id` never changes
/// - `updated_at >= created_at`
/// - every appended message is stamped at or after the previous one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    owner_id: UserId,
    title: ConversationTitle,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Conversation {
    /// Starts a new, empty conversation.
    pub fn start(owner_id: UserId, title: ConversationTitle) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            owner_id,
            title,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a conversation from persistence.
    pub fn reconstitute(
        id: ConversationId,
        owner_id: UserId,
        title: ConversationTitle,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn title(&self) -> &ConversationTitle {
        &self.title
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a message and advances `updated_at` to its timestamp.
    ///
    /// The returned message still has to be persisted by the caller.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is blank
    pub fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
        tokens_used: Option<u32>,
    ) -> Result<Message, DomainError> {
        self.append_at(role, content, tokens_used, Timestamp::now())
    }

    fn append_at(
        &mut self,
        role: Role,
        content: impl Into<String>,
        tokens_used: Option<u32>,
        now: Timestamp,
    ) -> Result<Message, DomainError> {
        let stamped = now.max(self.updated_at);
        let message = Message::new(self.id, role, content.into(), stamped, tokens_used)?;
        self.updated_at = stamped;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Conversation {
        Conversation::start(UserId::new(), ConversationTitle::from_question("Hello?"))
    }

    #[test]
    fn start_sets_equal_created_and_updated() {
        let conv = conversation();
        assert_eq!(conv.created_at(), conv.updated_at());
        assert_eq!(conv.title().as_str(), "Hello?");
    }

    #[test]
    fn append_links_message_and_advances_updated_at() {
        let mut conv = conversation();
        let before = *conv.updated_at();

        let msg = conv.append(Role::User, "Hello?", None).unwrap();

        assert_eq!(msg.conversation_id(), conv.id());
        assert_eq!(msg.role(), Role::User);
        assert_eq!(conv.updated_at(), msg.created_at());
        assert!(conv.updated_at() >= &before);
    }

    #[test]
    fn append_never_moves_time_backwards() {
        let mut conv = conversation();
        let later = conv.updated_at().plus_secs(3600).unwrap();
        let first = conv.append_at(Role::User, "q", None, later).unwrap();

        // Clock jumped back an hour
        let earlier = Timestamp::now();
        let second = conv
            .append_at(Role::Assistant, "a", Some(3), earlier)
            .unwrap();

        assert_eq!(first.created_at(), &later);
        assert!(second.created_at() >= first.created_at());
        assert_eq!(conv.updated_at(), &later);
    }

    #[test]
    fn blank_content_leaves_conversation_untouched() {
        let mut conv = conversation();
        let snapshot = conv.clone();
        let far_future = conv.updated_at().plus_secs(60).unwrap();

        assert!(conv.append_at(Role::User, "  ", None, far_future).is_err());
        assert_eq!(conv, snapshot);
    }
}

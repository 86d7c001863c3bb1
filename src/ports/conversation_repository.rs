//! Conversation repository port.
//!
//! Reads are always scoped by owner where an owner is known, so a
//! conversation that belongs to someone else looks exactly like one that
//! does not exist.
//!
//! Multi-step writes go through a [`ConversationTransaction`]: either every
//! write in it becomes visible on `commit`, or none does.

use async_trait::async_trait;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, UserId};

/// Repository port for conversations and their messages.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find a conversation by id, only if `owner_id` owns it.
    ///
    /// Filters on both columns in one lookup.
    async fn find_conversation(
        &self,
        id: &ConversationId,
        owner_id: &UserId,
    ) -> Result<Option<Conversation>, DomainError>;

    /// All conversations owned by `owner_id`, most recently updated first.
    async fn list_conversations(&self, owner_id: &UserId) -> Result<Vec<Conversation>, DomainError>;

    /// Messages of a conversation in creation order.
    ///
    /// Messages stamped with the same instant keep their insertion order.
    async fn list_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError>;

    /// Insert or update a conversation on its own.
    async fn save_conversation(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Append a single message on its own.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation was never saved
    async fn save_message(&self, message: &Message) -> Result<(), DomainError>;

    /// Start an atomic unit of writes.
    async fn begin(&self) -> Result<Box<dyn ConversationTransaction>, DomainError>;
}

/// Writes that become visible together on `commit`.
///
/// Dropping a transaction without committing discards all of its writes.
#[async_trait]
pub trait ConversationTransaction: Send {
    /// Insert or update (title, `updated_at`) a conversation.
    async fn save_conversation(&mut self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Append a message. Its conversation must be saved first, either
    /// earlier in this transaction or before it began.
    async fn save_message(&mut self, message: &Message) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

//! GetMessagesHandler - Messages of one owned conversation.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::Message;
use crate::domain::foundation::{ConversationId, DomainError, UserId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone)]
pub struct GetMessagesQuery {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
}

#[derive(Debug, Clone, Error)]
pub enum GetMessagesError {
    /// Missing, or owned by someone else.
    #[error("Conversation not found")]
    ConversationNotFound,

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

pub struct GetMessagesHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl GetMessagesHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    /// Returns messages in chronological order.
    pub async fn handle(&self, query: GetMessagesQuery) -> Result<Vec<Message>, GetMessagesError> {
        let conversation = self
            .conversations
            .find_conversation(&query.conversation_id, &query.user_id)
            .await?
            .ok_or(GetMessagesError::ConversationNotFound)?;

        Ok(self.conversations.list_messages(conversation.id()).await?)
    }
}

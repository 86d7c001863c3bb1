//! CreateConversationHandler - Starts an empty conversation.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{Conversation, ConversationTitle};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConversationRepository;

/// Command to create a conversation before any question is asked.
#[derive(Debug, Clone)]
pub struct CreateConversationCommand {
    pub user_id: UserId,
    /// Blank or missing titles become "New Chat".
    pub title: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub enum CreateConversationError {
    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

pub struct CreateConversationHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl CreateConversationHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(
        &self,
        cmd: CreateConversationCommand,
    ) -> Result<Conversation, CreateConversationError> {
        let title = ConversationTitle::from_requested(cmd.title.as_deref());
        let conversation = Conversation::start(cmd.user_id, title);

        self.conversations.save_conversation(&conversation).await?;

        tracing::debug!(conversation_id = %conversation.id(), "Conversation created");
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConversationRepository;
    use crate::domain::conversation::DEFAULT_TITLE;

    fn handler(repo: &InMemoryConversationRepository) -> CreateConversationHandler {
        CreateConversationHandler::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn creates_empty_conversation_with_requested_title() {
        let repo = InMemoryConversationRepository::new();
        let user_id = UserId::new();

        let conversation = handler(&repo)
            .handle(CreateConversationCommand {
                user_id,
                title: Some("  Orar  ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(conversation.title().as_str(), "Orar");
        assert!(conversation.is_owned_by(&user_id));
        assert_eq!(conversation.created_at(), conversation.updated_at());
        assert!(repo
            .find_conversation(conversation.id(), &user_id)
            .await
            .unwrap()
            .is_some());
        assert_eq!(repo.message_count().await, 0);
    }

    #[tokio::test]
    async fn missing_or_blank_title_defaults() {
        let repo = InMemoryConversationRepository::new();

        for title in [None, Some("   ".to_string())] {
            let conversation = handler(&repo)
                .handle(CreateConversationCommand {
                    user_id: UserId::new(),
                    title,
                })
                .await
                .unwrap();
            assert_eq!(conversation.title().as_str(), DEFAULT_TITLE);
        }
    }
}

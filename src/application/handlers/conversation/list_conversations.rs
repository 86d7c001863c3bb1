//! ListConversationsHandler - A user's conversation history.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConversationRepository;

#[derive(Debug, Clone)]
pub struct ListConversationsQuery {
    pub user_id: UserId,
}

/// Conversations, most recently updated first.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    pub conversations: Vec<Conversation>,
}

impl ConversationHistory {
    pub fn total(&self) -> usize {
        self.conversations.len()
    }
}

#[derive(Debug, Clone, Error)]
pub enum ListConversationsError {
    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

pub struct ListConversationsHandler {
    conversations: Arc<dyn ConversationRepository>,
}

impl ListConversationsHandler {
    pub fn new(conversations: Arc<dyn ConversationRepository>) -> Self {
        Self { conversations }
    }

    pub async fn handle(
        &self,
        query: ListConversationsQuery,
    ) -> Result<ConversationHistory, ListConversationsError> {
        let conversations = self.conversations.list_conversations(&query.user_id).await?;
        Ok(ConversationHistory { conversations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryConversationRepository;
    use crate::domain::conversation::{ConversationTitle, Role};

    #[tokio::test]
    async fn lists_only_own_conversations_latest_first() {
        let repo = InMemoryConversationRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let older = Conversation::start(alice, ConversationTitle::from_question("older"));
        let mut newer = Conversation::start(alice, ConversationTitle::from_question("newer"));
        let bobs = Conversation::start(bob, ConversationTitle::from_question("bob"));
        repo.save_conversation(&older).await.unwrap();
        repo.save_conversation(&newer).await.unwrap();
        repo.save_conversation(&bobs).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let message = newer.append(Role::User, "bump", None).unwrap();
        repo.save_conversation(&newer).await.unwrap();
        repo.save_message(&message).await.unwrap();

        let history = ListConversationsHandler::new(Arc::new(repo))
            .handle(ListConversationsQuery { user_id: alice })
            .await
            .unwrap();

        assert_eq!(history.total(), 2);
        assert_eq!(history.conversations[0].id(), newer.id());
        assert_eq!(history.conversations[1].id(), older.id());
    }

    #[tokio::test]
    async fn empty_history() {
        let history = ListConversationsHandler::new(Arc::new(InMemoryConversationRepository::new()))
            .handle(ListConversationsQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap();

        assert_eq!(history.total(), 0);
    }
}

//! In-memory conversation repository.
//!
//! Transactions buffer their writes and apply them under a single write lock
//! on commit, so readers never observe half of a transaction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, Message};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, UserId};
use crate::ports::{ConversationRepository, ConversationTransaction};

#[derive(Debug, Default)]
struct Store {
    conversations: HashMap<ConversationId, Conversation>,
    /// Insertion order doubles as the tie-breaker for equal timestamps.
    messages: Vec<Message>,
}

impl Store {
    fn upsert_conversation(&mut self, conversation: &Conversation) {
        self.conversations
            .insert(*conversation.id(), conversation.clone());
    }
}

#[derive(Debug, Default)]
struct Faults {
    fail_commits: AtomicBool,
    fail_message_writes: AtomicBool,
}

/// Conversations and messages kept in memory, for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    store: Arc<RwLock<Store>>,
    faults: Arc<Faults>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every transaction commit fail, discarding its writes.
    pub fn fail_commits(&self, fail: bool) {
        self.faults.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Makes every message write fail, inside or outside a transaction.
    pub fn fail_message_writes(&self, fail: bool) {
        self.faults.fail_message_writes.store(fail, Ordering::SeqCst);
    }

    /// Total number of stored messages across all conversations.
    pub async fn message_count(&self) -> usize {
        self.store.read().await.messages.len()
    }

    pub async fn conversation_count(&self) -> usize {
        self.store.read().await.conversations.len()
    }

    fn check_message_write(&self) -> Result<(), DomainError> {
        if self.faults.fail_message_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("simulated message write failure"));
        }
        Ok(())
    }
}

fn conversation_not_found(id: &ConversationId) -> DomainError {
    DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
        .with_detail("conversation_id", id.to_string())
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn find_conversation(
        &self,
        id: &ConversationId,
        owner_id: &UserId,
    ) -> Result<Option<Conversation>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .conversations
            .get(id)
            .filter(|c| c.is_owned_by(owner_id))
            .cloned())
    }

    async fn list_conversations(&self, owner_id: &UserId) -> Result<Vec<Conversation>, DomainError> {
        let store = self.store.read().await;
        let mut owned: Vec<Conversation> = store
            .conversations
            .values()
            .filter(|c| c.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(owned)
    }

    async fn list_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        let store = self.store.read().await;
        let mut messages: Vec<Message> = store
            .messages
            .iter()
            .filter(|m| m.conversation_id() == conversation_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps
        messages.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(messages)
    }

    async fn save_conversation(&self, conversation: &Conversation) -> Result<(), DomainError> {
        self.store.write().await.upsert_conversation(conversation);
        Ok(())
    }

    async fn save_message(&self, message: &Message) -> Result<(), DomainError> {
        self.check_message_write()?;
        let mut store = self.store.write().await;
        if !store.conversations.contains_key(message.conversation_id()) {
            return Err(conversation_not_found(message.conversation_id()));
        }
        store.messages.push(message.clone());
        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn ConversationTransaction>, DomainError> {
        Ok(Box::new(InMemoryConversationTransaction {
            repository: self.clone(),
            conversations: Vec::new(),
            messages: Vec::new(),
        }))
    }
}

/// Buffered writes against an [`InMemoryConversationRepository`].
pub struct InMemoryConversationTransaction {
    repository: InMemoryConversationRepository,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

#[async_trait]
impl ConversationTransaction for InMemoryConversationTransaction {
    async fn save_conversation(&mut self, conversation: &Conversation) -> Result<(), DomainError> {
        self.conversations.push(conversation.clone());
        Ok(())
    }

    async fn save_message(&mut self, message: &Message) -> Result<(), DomainError> {
        self.repository.check_message_write()?;

        let id = message.conversation_id();
        let pending = self.conversations.iter().any(|c| c.id() == id);
        let stored = self
            .repository
            .store
            .read()
            .await
            .conversations
            .contains_key(id);
        if !pending && !stored {
            return Err(conversation_not_found(id));
        }

        self.messages.push(message.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        if self.repository.faults.fail_commits.load(Ordering::SeqCst) {
            return Err(DomainError::database("simulated commit failure"));
        }

        let mut store = self.repository.store.write().await;
        for conversation in &self.conversations {
            store.upsert_conversation(conversation);
        }
        store.messages.extend(self.messages);
        Ok(())
    }
}

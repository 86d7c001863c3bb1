//! HandleQueryHandler - Answers a question inside a conversation.
//!
//! One call records a user turn and an assistant turn:
//!
//! 1. Resolve the acting user
//! 2. Load the owned conversation, or start one titled after the question
//! 3. Append the user message
//! 4. Ask the answer service (bounded by a timeout; failures become the fallback answer)
//! 5. Append the assistant message
//! 6. Commit the conversation and both messages in one transaction
//!
//! All changes are staged on the in-memory aggregate until step 6, so a slow
//! answer service never holds a database transaction open.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::domain::conversation::{Conversation, ConversationTitle, Message, Role};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, MessageId, UserId};
use crate::ports::{
    Answer, AnswerProvider, ConversationRepository, ProviderError, UserRepository,
};

use super::answer_fallback::answer_or_fallback;
use super::conversation_locks::ConversationLocks;

/// Upper bound for a single answer-service call unless configured otherwise.
pub const DEFAULT_ANSWER_TIMEOUT: Duration = Duration::from_secs(20);

/// Command to answer a question.
#[derive(Debug, Clone)]
pub struct HandleQueryCommand {
    pub user_id: UserId,
    /// Non-blank question text; blank input is rejected at the HTTP boundary.
    pub question: String,
    /// Continue this conversation, or start a new one when `None`.
    pub conversation_id: Option<ConversationId>,
}

/// Result of a handled query.
#[derive(Debug, Clone)]
pub struct HandleQueryResult {
    /// The stored assistant text (provider answer or fallback).
    pub answer: String,
    pub conversation_id: ConversationId,
    /// Id of the assistant message.
    pub message_id: MessageId,
    pub conversation_title: String,
}

/// Errors that can occur when handling a query.
#[derive(Debug, Clone, Error)]
pub enum HandleQueryError {
    #[error("User not found")]
    UserNotFound,

    /// Missing, or owned by someone else.
    #[error("Conversation not found")]
    ConversationNotFound,

    #[error("Query cannot be empty")]
    EmptyQuestion,

    #[error("Repository error: {0}")]
    Repository(DomainError),
}

impl From<DomainError> for HandleQueryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConversationNotFound => HandleQueryError::ConversationNotFound,
            ErrorCode::UserNotFound => HandleQueryError::UserNotFound,
            ErrorCode::EmptyField => HandleQueryError::EmptyQuestion,
            _ => HandleQueryError::Repository(err),
        }
    }
}

/// Handler for questions sent to the assistant.
pub struct HandleQueryHandler {
    users: Arc<dyn UserRepository>,
    conversations: Arc<dyn ConversationRepository>,
    answers: Arc<dyn AnswerProvider>,
    answer_timeout: Duration,
    locks: ConversationLocks,
}

impl HandleQueryHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        conversations: Arc<dyn ConversationRepository>,
        answers: Arc<dyn AnswerProvider>,
    ) -> Self {
        Self {
            users,
            conversations,
            answers,
            answer_timeout: DEFAULT_ANSWER_TIMEOUT,
            locks: ConversationLocks::new(),
        }
    }

    pub fn with_answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = timeout;
        self
    }

    #[tracing::instrument(
        skip(self, cmd),
        fields(user_id = %cmd.user_id, conversation_id = ?cmd.conversation_id)
    )]
    pub async fn handle(&self, cmd: HandleQueryCommand) -> Result<HandleQueryResult, HandleQueryError> {
        if cmd.question.trim().is_empty() {
            return Err(HandleQueryError::EmptyQuestion);
        }

        // 1. Resolve the acting user
        if self.users.find_by_id(&cmd.user_id).await?.is_none() {
            return Err(HandleQueryError::UserNotFound);
        }

        // 2. Resolve or start the conversation; queries on one conversation run one at a time
        let (mut conversation, _guard) = match cmd.conversation_id {
            Some(id) => {
                let guard = self.locks.acquire(id).await;
                let conversation = self
                    .conversations
                    .find_conversation(&id, &cmd.user_id)
                    .await?
                    .ok_or(HandleQueryError::ConversationNotFound)?;
                (conversation, Some(guard))
            }
            None => (
                Conversation::start(cmd.user_id, ConversationTitle::from_question(&cmd.question)),
                None,
            ),
        };

        // 3. User turn
        let user_message = conversation.append(Role::User, cmd.question.as_str(), None)?;

        // 4. Answer, or the fallback text
        let answer = answer_or_fallback(self.ask(&cmd.question).await);

        // 5. Assistant turn
        let assistant_message =
            conversation.append(Role::Assistant, answer.text.as_str(), answer.tokens_used)?;

        // 6. Persist everything or nothing
        self.persist(&conversation, &user_message, &assistant_message)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist query turn");
                HandleQueryError::Repository(e)
            })?;

        tracing::info!(
            conversation_id = %conversation.id(),
            message_id = %assistant_message.id(),
            "Query answered"
        );

        Ok(HandleQueryResult {
            answer: answer.text,
            conversation_id: *conversation.id(),
            message_id: *assistant_message.id(),
            conversation_title: conversation.title().as_str().to_string(),
        })
    }

    async fn ask(&self, question: &str) -> Result<Answer, ProviderError> {
        match tokio::time::timeout(self.answer_timeout, self.answers.generate(question)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::Timeout),
        }
    }

    async fn persist(
        &self,
        conversation: &Conversation,
        user_message: &Message,
        assistant_message: &Message,
    ) -> Result<(), DomainError> {
        let mut tx = self.conversations.begin().await?;
        tx.save_conversation(conversation).await?;
        tx.save_message(user_message).await?;
        tx.save_message(assistant_message).await?;
        tx.commit().await
    }
}

//! HTTP handlers for chat endpoints.
//!
//! Every handler takes the caller from `RequireAuth` and passes the id on
//! explicitly to the application layer.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error_response::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::conversation::{
    CreateConversationCommand, CreateConversationError, CreateConversationHandler,
    GetMessagesError, GetMessagesHandler, GetMessagesQuery, HandleQueryCommand, HandleQueryError,
    HandleQueryHandler, ListConversationsError, ListConversationsHandler, ListConversationsQuery,
};
use crate::domain::foundation::ConversationId;
use crate::ports::ConversationRepository;

use super::dto::{
    ConversationResponse, CreateConversationRequest, HistoryResponse, MessageResponse,
    QueryRequest, QueryResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared chat dependencies.
///
/// The query handler is shared rather than built per request because it owns
/// the per-conversation lock registry.
#[derive(Clone)]
pub struct ChatAppState {
    pub conversations: Arc<dyn ConversationRepository>,
    pub query_handler: Arc<HandleQueryHandler>,
}

impl ChatAppState {
    pub fn create_conversation_handler(&self) -> CreateConversationHandler {
        CreateConversationHandler::new(self.conversations.clone())
    }

    pub fn list_conversations_handler(&self) -> ListConversationsHandler {
        ListConversationsHandler::new(self.conversations.clone())
    }

    pub fn get_messages_handler(&self) -> GetMessagesHandler {
        GetMessagesHandler::new(self.conversations.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/chat/history - Caller's conversations, latest first
pub async fn get_history(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ChatApiError> {
    let history = state
        .list_conversations_handler()
        .handle(ListConversationsQuery { user_id: user.id })
        .await?;

    Ok(Json(HistoryResponse::from(history)))
}

/// GET /api/chat/conversations/:id/messages - Messages of an owned conversation
pub async fn get_messages(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
    Path(conversation_id): Path<ConversationId>,
) -> Result<impl IntoResponse, ChatApiError> {
    let messages = state
        .get_messages_handler()
        .handle(GetMessagesQuery {
            user_id: user.id,
            conversation_id,
        })
        .await?;

    let response: Vec<MessageResponse> = messages.iter().map(Into::into).collect();
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/query - Ask a question, optionally in an existing conversation
pub async fn send_query(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<QueryRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let question = request.question().ok_or(ChatApiError::EmptyQuery)?;

    let result = state
        .query_handler
        .handle(HandleQueryCommand {
            user_id: user.id,
            question: question.to_string(),
            conversation_id: request.conversation_id,
        })
        .await?;

    Ok(Json(QueryResponse::from(result)))
}

/// POST /api/chat/conversations - Create an empty conversation
pub async fn create_conversation(
    State(state): State<ChatAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateConversationRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let conversation = state
        .create_conversation_handler()
        .handle(CreateConversationCommand {
            user_id: user.id,
            title: request.title,
        })
        .await?;

    Ok(Json(ConversationResponse::from(&conversation)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts chat errors to HTTP responses.
///
/// Internal details are logged, never returned.
#[derive(Debug)]
pub enum ChatApiError {
    EmptyQuery,
    NotFound(&'static str),
    Internal(String),
}

impl From<HandleQueryError> for ChatApiError {
    fn from(err: HandleQueryError) -> Self {
        match err {
            HandleQueryError::EmptyQuestion => ChatApiError::EmptyQuery,
            HandleQueryError::ConversationNotFound => ChatApiError::NotFound("Conversation not found"),
            HandleQueryError::UserNotFound => ChatApiError::NotFound("User not found"),
            HandleQueryError::Repository(e) => ChatApiError::Internal(e.to_string()),
        }
    }
}

impl From<GetMessagesError> for ChatApiError {
    fn from(err: GetMessagesError) -> Self {
        match err {
            GetMessagesError::ConversationNotFound => ChatApiError::NotFound("Conversation not found"),
            GetMessagesError::Repository(e) => ChatApiError::Internal(e.to_string()),
        }
    }
}

impl From<ListConversationsError> for ChatApiError {
    fn from(err: ListConversationsError) -> Self {
        match err {
            ListConversationsError::Repository(e) => ChatApiError::Internal(e.to_string()),
        }
    }
}

impl From<CreateConversationError> for ChatApiError {
    fn from(err: CreateConversationError) -> Self {
        match err {
            CreateConversationError::Repository(e) => ChatApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ChatApiError::EmptyQuery => (StatusCode::BAD_REQUEST, "Query cannot be empty"),
            ChatApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ChatApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Chat request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DomainError;

    #[test]
    fn foreign_and_missing_conversations_map_to_same_response() {
        let from_query = ChatApiError::from(HandleQueryError::ConversationNotFound).into_response();
        let from_messages =
            ChatApiError::from(GetMessagesError::ConversationNotFound).into_response();

        assert_eq!(from_query.status(), StatusCode::NOT_FOUND);
        assert_eq!(from_messages.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn repository_failures_are_500() {
        let response = ChatApiError::from(HandleQueryError::Repository(DomainError::database(
            "connection reset",
        )))
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_query_is_400() {
        let response = ChatApiError::EmptyQuery.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

//! Axum router configuration for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_conversation, get_history, get_messages, send_query, ChatAppState};

/// Chat routes, mounted at `/api/chat`. All require authentication.
///
/// - `GET /history` - Conversation list with count
/// - `POST /query` - Ask a question
/// - `POST /conversations` - Create an empty conversation
/// - `GET /conversations/:id/messages` - Messages in creation order
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/history", get(get_history))
        .route("/query", post(send_query))
        .route("/conversations", post(create_conversation))
        .route("/conversations/:id/messages", get(get_messages))
}

//! HTTP adapter for chat endpoints.
//!
//! - `GET /api/chat/history` - List the caller's conversations
//! - `POST /api/chat/query` - Ask a question
//! - `POST /api/chat/conversations` - Create an empty conversation
//! - `GET /api/chat/conversations/:id/messages` - Read a conversation

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ChatApiError, ChatAppState};
pub use routes::chat_routes;

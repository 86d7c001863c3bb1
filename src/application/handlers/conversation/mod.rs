//! Conversation command and query handlers.
//!
//! Answering questions, creating conversations, and reading history.

mod answer_fallback;
mod conversation_locks;
mod create_conversation;
mod get_messages;
mod handle_query;
mod list_conversations;

pub use answer_fallback::{answer_or_fallback, FALLBACK_ANSWER};
pub use conversation_locks::ConversationLocks;
pub use create_conversation::{
    CreateConversationCommand, CreateConversationError, CreateConversationHandler,
};
pub use get_messages::{GetMessagesError, GetMessagesHandler, GetMessagesQuery};
pub use handle_query::{
    HandleQueryCommand, HandleQueryError, HandleQueryHandler, HandleQueryResult,
    DEFAULT_ANSWER_TIMEOUT,
};
pub use list_conversations::{
    ConversationHistory, ListConversationsError, ListConversationsHandler, ListConversationsQuery,
};

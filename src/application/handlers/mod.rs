//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;
pub mod user;

pub use conversation::{
    answer_or_fallback, ConversationHistory, ConversationLocks, CreateConversationCommand,
    CreateConversationError, CreateConversationHandler, GetMessagesError, GetMessagesHandler,
    GetMessagesQuery, HandleQueryCommand, HandleQueryError, HandleQueryHandler, HandleQueryResult,
    ListConversationsError, ListConversationsHandler, ListConversationsQuery,
    DEFAULT_ANSWER_TIMEOUT, FALLBACK_ANSWER,
};
pub use user::{LoginError, LoginHandler, RegisterError, RegisterHandler, SignedInUser};

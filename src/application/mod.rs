//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers receive the acting user as an explicit argument; they never look
//! up request context themselves.

pub mod handlers;

pub use handlers::{
    // Conversation handlers
    CreateConversationCommand, CreateConversationHandler, GetMessagesHandler, GetMessagesQuery,
    HandleQueryCommand, HandleQueryHandler, HandleQueryResult, ListConversationsHandler,
    ListConversationsQuery,
    // Account handlers
    LoginHandler, RegisterHandler, SignedInUser,
};

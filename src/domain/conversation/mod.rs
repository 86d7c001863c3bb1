//! Conversation domain module.
//!
//! A user's question/answer history: conversations owned by one user and the
//! ordered messages inside them.

mod conversation;
mod message;
mod title;

pub use conversation::Conversation;
pub use message::{Message, Role};
pub use title::{ConversationTitle, DEFAULT_TITLE, MAX_TITLE_CHARS};

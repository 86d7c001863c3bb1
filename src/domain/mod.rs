//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth types, errors)
//! - `user` - Registered accounts and credential rules
//! - `conversation` - Conversations, their titles and messages

pub mod conversation;
pub mod foundation;
pub mod user;

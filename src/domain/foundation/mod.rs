//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, authentication types and the error vocabulary
//! used by every other layer.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConversationId, MessageId, UserId};
pub use timestamp::Timestamp;

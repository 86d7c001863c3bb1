//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the authentication gate binds to a request
//! once a bearer token has been verified and its subject resolved to a
//! stored user. Handlers receive it as an explicit argument.

use super::UserId;
use thiserror::Error;

/// Identity bound to a request after the token was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stored user the token subject resolved to.
    pub id: UserId,

    /// Email address, which is also the token subject.
    pub email: String,

    pub display_name: String,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}

/// Authentication errors that can occur during token validation.
///
/// Every variant except `ServiceUnavailable` is reported to clients with the
/// same generic rejection, so callers cannot tell which check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Missing, malformed, badly signed, or expired token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token verified but its subject no longer matches a stored user.
    #[error("User not found")]
    UserNotFound,

    /// User lookup failed for infrastructure reasons.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

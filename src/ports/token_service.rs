//! Token service port.
//!
//! Issues and verifies signed, time-bounded session tokens. Tokens are
//! self-contained: verification needs only the shared secret and the clock,
//! never a lookup.

use thiserror::Error;

use crate::domain::foundation::{AuthError, Timestamp};

/// A freshly signed token together with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact serialized token, sent as `Authorization: Bearer <token>`.
    pub token: String,
    pub subject: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Failure to produce a token.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens.
///
/// # Contract
///
/// - `verify_at(issue_at(s, t).token, now)` returns `s` while `now` is before
///   the expiry, and `AuthError::InvalidToken` from the expiry onward
/// - any change to the signed content yields `AuthError::InvalidToken`
/// - malformed and expired tokens are indistinguishable to the caller
pub trait TokenService: Send + Sync {
    /// Signs a token for `subject` as if issued at `issued_at`.
    fn issue_at(&self, subject: &str, issued_at: Timestamp) -> Result<IssuedToken, TokenError>;

    /// Returns the subject if the token is authentic and unexpired at `now`.
    fn verify_at(&self, token: &str, now: Timestamp) -> Result<String, AuthError>;

    /// Signs a token for `subject` issued now.
    fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Timestamp::now())
    }

    /// Verifies a token against the current time.
    fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.verify_at(token, Timestamp::now())
    }
}

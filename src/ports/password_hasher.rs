//! Password hashing port.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PasswordHashError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// One-way password hashing.
///
/// Hashing is deliberately slow, so implementations should keep the work off
/// the async executor threads.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing string.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`, not an error.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

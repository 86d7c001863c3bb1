//! LoginHandler - Exchanges email and password for a session token.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;

use crate::domain::foundation::DomainError;
use crate::domain::user::{CredentialViolations, LoginInput};
use crate::ports::{PasswordHasher, TokenService, UserRepository};

use super::SignedInUser;

/// Hashed once and verified against when the email is unknown, so a miss
/// costs the same hash work as a wrong password.
const DECOY_PASSWORD: &str = "askfmi-decoy-password";

#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error("Validation failed: {0}")]
    Validation(CredentialViolations),

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("Repository error: {0}")]
    Repository(#[from] DomainError),
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    decoy_hash: OnceCell<String>,
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            decoy_hash: OnceCell::new(),
        }
    }

    pub async fn handle(&self, input: LoginInput) -> Result<SignedInUser, LoginError> {
        let valid = input.validate().map_err(LoginError::Validation)?;

        let Some(user) = self.users.find_by_email(&valid.email).await? else {
            self.verify_against_decoy(&valid.password).await;
            return Err(LoginError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify(&valid.password, user.password_hash())
            .await
            .map_err(|e| LoginError::Hashing(e.to_string()))?;
        if !matches {
            tracing::debug!(user_id = %user.id(), "Login rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.email().as_str())
            .map_err(|e| LoginError::Token(e.to_string()))?;

        Ok(SignedInUser { user, token })
    }

    async fn verify_against_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await;
        let outcome = match decoy {
            Ok(hash) => self.hasher.verify(password, hash).await.map(|_| ()),
            Err(e) => Err(e),
        };
        if let Err(e) = outcome {
            tracing::warn!(error = %e, "Decoy password verification failed");
        }
    }
}

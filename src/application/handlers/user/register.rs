//! RegisterHandler - Creates an account and signs the new user in.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::{CredentialViolations, RegistrationInput, User};
use crate::ports::{IssuedToken, PasswordHasher, TokenService, UserRepository};

/// A user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct SignedInUser {
    pub user: User,
    pub token: IssuedToken,
}

#[derive(Debug, Clone, Error)]
pub enum RegisterError {
    #[error("Validation failed: {0}")]
    Validation(CredentialViolations),

    #[error("This email is already in use")]
    EmailTaken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    Token(String),

    #[error("Repository error: {0}")]
    Repository(DomainError),
}

impl From<DomainError> for RegisterError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailAlreadyExists => RegisterError::EmailTaken,
            _ => RegisterError::Repository(err),
        }
    }
}

pub struct RegisterHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl RegisterHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, input: RegistrationInput) -> Result<SignedInUser, RegisterError> {
        let valid = input.validate().map_err(RegisterError::Validation)?;

        if self.users.exists_by_email(&valid.email).await? {
            return Err(RegisterError::EmailTaken);
        }

        let password_hash = self
            .hasher
            .hash(&valid.password)
            .await
            .map_err(|e| RegisterError::Hashing(e.to_string()))?;

        let user = User::register(valid.email, valid.name, password_hash);
        // The repository re-checks uniqueness for registrations racing past the check above
        self.users.save(&user).await?;

        let token = self
            .tokens
            .issue(user.email().as_str())
            .map_err(|e| RegisterError::Token(e.to_string()))?;

        tracing::info!(user_id = %user.id(), "User registered");
        Ok(SignedInUser { user, token })
    }
}

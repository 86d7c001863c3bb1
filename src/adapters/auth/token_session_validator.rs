//! `SessionValidator` backed by the token service and the user store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::user::Email;
use crate::ports::{SessionValidator, TokenService, UserRepository};

/// Verifies the token, then resolves its subject to a stored user.
///
/// A valid signature alone is not enough: a user deleted after the token was
/// issued is rejected.
pub struct TokenSessionValidator {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
}

impl TokenSessionValidator {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl SessionValidator for TokenSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let subject = self.tokens.verify(token)?;

        let user = self
            .users
            .find_by_email(&Email::from_trusted(subject))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "User lookup failed during authentication");
                AuthError::service_unavailable("user lookup failed")
            })?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthenticatedUser::new(
            *user.id(),
            user.email().as_str(),
            user.name(),
        ))
    }
}

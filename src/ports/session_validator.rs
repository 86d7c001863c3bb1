//! Session validation port.
//!
//! Turns a raw bearer token into the identity of a stored user. This is what
//! the authentication gate calls for every protected request.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates bearer tokens and resolves them to a known user.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed, forged, or expired tokens
/// - Return `AuthError::UserNotFound` when the subject has no stored user
/// - Return `AuthError::ServiceUnavailable` for transient lookup failures
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    /// Answers from the token text alone, one outcome per contract case.
    struct ScriptedValidator {
        alice: AuthenticatedUser,
    }

    #[async_trait]
    impl SessionValidator for ScriptedValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            match token {
                "alice" => Ok(self.alice.clone()),
                "deleted" => Err(AuthError::UserNotFound),
                "outage" => Err(AuthError::service_unavailable("user store down")),
                _ => Err(AuthError::InvalidToken),
            }
        }
    }

    fn validator() -> Box<dyn SessionValidator> {
        Box::new(ScriptedValidator {
            alice: AuthenticatedUser::new(UserId::new(), "alice@example.com", "Alice"),
        })
    }

    #[tokio::test]
    async fn callers_can_tell_outages_from_bad_tokens() {
        let validator = validator();

        let outage = validator.validate("outage").await.unwrap_err();
        let deleted = validator.validate("deleted").await.unwrap_err();
        let forged = validator.validate("forged").await.unwrap_err();

        assert!(matches!(outage, AuthError::ServiceUnavailable(_)));
        assert_eq!(deleted, AuthError::UserNotFound);
        assert_eq!(forged, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn valid_token_yields_stored_identity() {
        let user = validator().validate("alice").await.unwrap();
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn session_validator_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}

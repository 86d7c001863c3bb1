//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User};

/// Persistence for registered users.
///
/// Implementations must enforce email uniqueness themselves, since two
/// registrations can race past an `exists_by_email` check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `EmailAlreadyExists` if another user has the same email
    /// - `DatabaseError` on persistence failure
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError>;
}

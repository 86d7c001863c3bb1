//! User entity.

use crate::domain::foundation::{Timestamp, UserId};

use super::Email;

/// A registered account.
///
/// # Invariants
///
/// - `email` is unique across users (enforced by the repository)
/// - only `password_hash` may change after registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: String,
    password_hash: String,
    created_at: Timestamp,
}

impl User {
    /// Creates a new user with a freshly assigned id.
    ///
    /// Inputs are expected to have passed [`super::RegistrationInput::validate`].
    pub fn register(email: Email, name: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email,
            name: name.into(),
            password_hash: password_hash.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a user from persistence.
    pub fn reconstitute(
        id: UserId,
        email: Email,
        name: String,
        password_hash: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Replaces the stored password hash.
    pub fn change_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_assigns_id_and_keeps_fields() {
        let email = Email::parse("alice@example.com").unwrap();
        let user = User::register(email.clone(), "Alice", "$argon2id$hash");

        assert_eq!(user.email(), &email);
        assert_eq!(user.name(), "Alice");
        assert_eq!(user.password_hash(), "$argon2id$hash");
    }

    #[test]
    fn two_registrations_get_distinct_ids() {
        let email = Email::parse("alice@example.com").unwrap();
        let a = User::register(email.clone(), "Alice", "h");
        let b = User::register(email, "Alice", "h");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn change_password_hash_keeps_identity() {
        let mut user = User::register(Email::parse("bob@example.com").unwrap(), "Bob", "old");
        let id = *user.id();
        user.change_password_hash("new");
        assert_eq!(user.password_hash(), "new");
        assert_eq!(user.id(), &id);
    }
}

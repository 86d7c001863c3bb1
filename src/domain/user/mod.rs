//! User module - accounts and credential rules.

mod credentials;
mod email;
mod user;

pub use credentials::{
    CredentialViolations, LoginInput, RegistrationInput, ValidLogin, ValidRegistration,
    NAME_MAX_CHARS, NAME_MIN_CHARS, PASSWORD_MIN_CHARS,
};
pub use email::Email;
pub use user::User;

//! HTTP DTOs for registration and login.

use serde::{Deserialize, Serialize};

use crate::application::handlers::user::SignedInUser;
use crate::domain::user::{LoginInput, RegistrationInput};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Missing fields deserialize as empty strings so they surface as
/// validation messages rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<RegisterRequest> for RegistrationInput {
    fn from(request: RegisterRequest) -> Self {
        RegistrationInput {
            name: request.name,
            email: request.email,
            password: request.password,
            confirm_password: request.confirm_password,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(request: LoginRequest) -> Self {
        LoginInput {
            email: request.email,
            password: request.password,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Token plus the user it was issued for.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, signed_in: SignedInUser) -> Self {
        let SignedInUser { user, token } = signed_in;
        Self {
            message: message.into(),
            token: token.token,
            user: UserInfo {
                id: user.id().to_string(),
                name: user.name().to_string(),
                email: user.email().to_string(),
            },
        }
    }
}

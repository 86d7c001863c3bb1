//! HTTP handlers for registration and login.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error_response::ErrorResponse;
use crate::application::handlers::user::{LoginError, LoginHandler, RegisterError, RegisterHandler};
use crate::domain::user::CredentialViolations;
use crate::ports::{PasswordHasher, TokenService, UserRepository};

use super::dto::{AuthResponse, LoginRequest, RegisterRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthAppState {
    pub users: Arc<dyn UserRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
}

impl AuthAppState {
    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/register - Create an account and sign in
pub async fn register(
    State(state): State<AuthAppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let signed_in = state.register_handler().handle(request.into()).await?;
    Ok(Json(AuthResponse::new("User registered successfully", signed_in)))
}

/// POST /api/auth/login - Exchange credentials for a token
pub async fn login(
    State(state): State<AuthAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let signed_in = state.login_handler().handle(request.into()).await?;
    Ok(Json(AuthResponse::new("Login successful", signed_in)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts account errors to HTTP responses.
#[derive(Debug)]
pub enum AuthApiError {
    Validation(CredentialViolations),
    EmailTaken,
    InvalidCredentials,
    Internal(String),
}

impl From<RegisterError> for AuthApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Validation(violations) => AuthApiError::Validation(violations),
            RegisterError::EmailTaken => AuthApiError::EmailTaken,
            other => AuthApiError::Internal(other.to_string()),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Validation(violations) => AuthApiError::Validation(violations),
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            other => AuthApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AuthApiError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation failed")
                    .with_message(violations.summary())
                    .with_details(violations.messages().to_vec()),
            ),
            AuthApiError::EmailTaken => (
                StatusCode::CONFLICT,
                ErrorResponse::new("This email is already in use"),
            ),
            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Invalid email or password"),
            ),
            AuthApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Account request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

//! Axum router configuration for account endpoints.

use axum::{routing::post, Router};

use super::handlers::{login, register, AuthAppState};

/// Account routes, mounted at `/api/auth`. Both bypass the authentication gate.
///
/// - `POST /register` - Create account, returns a token
/// - `POST /login` - Returns a token
pub fn auth_routes() -> Router<AuthAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

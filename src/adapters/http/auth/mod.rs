//! HTTP adapter for account endpoints.
//!
//! - `POST /api/auth/register` - Register and receive a token
//! - `POST /api/auth/login` - Log in and receive a token

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AuthApiError, AuthAppState};
pub use routes::auth_routes;

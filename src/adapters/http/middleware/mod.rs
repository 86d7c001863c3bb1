//! HTTP middleware for axum.
//!
//! - `auth` - Authentication gate and extractor

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth, PUBLIC_PATHS};

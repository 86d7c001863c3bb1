//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers, and routes:
//! - `auth` - Registration and login (public)
//! - `chat` - Conversations and questions (behind the authentication gate)
//! - `health` - Liveness (public)

pub mod auth;
pub mod chat;
pub mod error_response;
pub mod health;
pub mod middleware;
pub mod router;

pub use error_response::ErrorResponse;
pub use router::{api_routes, cors_layer, create_router, ApiDependencies, ApiState};

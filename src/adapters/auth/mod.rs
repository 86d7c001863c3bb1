//! Authentication adapters.
//!
//! - `jwt_token_service` - HS256 session tokens (`TokenService`)
//! - `token_session_validator` - Token + user store (`SessionValidator`)
//! - `argon2_hasher` - Argon2id password hashing (`PasswordHasher`)
//! - `mock` - Fixed-token validator for tests

mod argon2_hasher;
mod jwt_token_service;
mod mock;
mod token_session_validator;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_token_service::JwtTokenService;
pub use mock::MockSessionValidator;
pub use token_session_validator::TokenSessionValidator;

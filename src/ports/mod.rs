//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Authentication
//!
//! - `TokenService` - Signs and verifies session tokens
//! - `SessionValidator` - Resolves a bearer token to a stored user
//! - `PasswordHasher` - One-way password hashing
//!
//! ## Persistence
//!
//! - `UserRepository` - Registered users
//! - `ConversationRepository` / `ConversationTransaction` - Conversations and messages
//!
//! ## External services
//!
//! - `AnswerProvider` - Question answering service

mod answer_provider;
mod conversation_repository;
mod password_hasher;
mod session_validator;
mod token_service;
mod user_repository;

pub use answer_provider::{Answer, AnswerProvider, ProviderError};
pub use conversation_repository::{ConversationRepository, ConversationTransaction};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use session_validator::SessionValidator;
pub use token_service::{IssuedToken, TokenError, TokenService};
pub use user_repository::UserRepository;

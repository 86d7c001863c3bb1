//! In-memory adapters.
//!
//! Back the persistence ports with plain maps behind async locks. Used by
//! the test suites and for running the API without a database. Each adapter
//! can inject failures so error paths are testable.

mod conversation_repository;
mod user_repository;

pub use conversation_repository::{InMemoryConversationRepository, InMemoryConversationTransaction};
pub use user_repository::InMemoryUserRepository;

//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Registered users
//! - `PostgresConversationRepository` - Conversations and messages, with transactions
//!
//! Schema lives in `migrations/` at the crate root.

mod conversation_repository;
mod user_repository;

pub use conversation_repository::{PostgresConversationRepository, PostgresConversationTransaction};
pub use user_repository::PostgresUserRepository;

use sqlx::migrate::MigrateError;
use sqlx::PgPool;

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

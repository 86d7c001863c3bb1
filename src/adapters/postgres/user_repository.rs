//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Email, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET password_hash = EXCLUDED.password_hash
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.name())
        .bind(user.password_hash())
        .bind(user.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::EmailAlreadyExists,
                "This email is already in use",
            ),
            _ => DomainError::database(format!("Failed to insert user: {}", e)),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS present")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to check email: {}", e)))?;

        row.try_get("present")
            .map_err(|e| DomainError::database(format!("Failed to read row: {}", e)))
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let read = |e: sqlx::Error| DomainError::database(format!("Failed to read user row: {}", e));

    let id: Uuid = row.try_get("id").map_err(read)?;
    let email: String = row.try_get("email").map_err(read)?;
    let name: String = row.try_get("name").map_err(read)?;
    let password_hash: String = row.try_get("password_hash").map_err(read)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(read)?;

    Ok(User::reconstitute(
        UserId::from_uuid(id),
        Email::from_trusted(email),
        name,
        password_hash,
        Timestamp::from_datetime(created_at),
    ))
}

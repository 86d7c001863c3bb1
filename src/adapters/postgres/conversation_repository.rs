//! PostgreSQL implementation of ConversationRepository.
//!
//! Messages are ordered by `created_at` and then by the `seq` column, which
//! records insertion order.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::conversation::{Conversation, ConversationTitle, Message, Role};
use crate::domain::foundation::{
    ConversationId, DomainError, ErrorCode, MessageId, Timestamp, UserId,
};
use crate::ports::{ConversationRepository, ConversationTransaction};

/// PostgreSQL implementation of ConversationRepository.
#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn find_conversation(
        &self,
        id: &ConversationId,
        owner_id: &UserId,
    ) -> Result<Option<Conversation>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM conversations
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch conversation: {}", e)))?;

        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn list_conversations(&self, owner_id: &UserId) -> Result<Vec<Conversation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list conversations: {}", e)))?;

        rows.iter().map(row_to_conversation).collect()
    }

    async fn list_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, conversation_id, role, content, created_at, tokens_used
            FROM messages
            WHERE conversation_id = $1
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(conversation_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch messages: {}", e)))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn save_conversation(&self, conversation: &Conversation) -> Result<(), DomainError> {
        upsert_conversation(&self.pool, conversation).await
    }

    async fn save_message(&self, message: &Message) -> Result<(), DomainError> {
        insert_message(&self.pool, message).await
    }

    async fn begin(&self) -> Result<Box<dyn ConversationTransaction>, DomainError> {
        let tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to start transaction: {}", e))
        })?;
        Ok(Box::new(PostgresConversationTransaction { tx }))
    }
}

/// Open database transaction; rolled back by sqlx when dropped uncommitted.
pub struct PostgresConversationTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ConversationTransaction for PostgresConversationTransaction {
    async fn save_conversation(&mut self, conversation: &Conversation) -> Result<(), DomainError> {
        upsert_conversation(&mut *self.tx, conversation).await
    }

    async fn save_message(&mut self, message: &Message) -> Result<(), DomainError> {
        insert_message(&mut *self.tx, message).await
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared statements
// ─────────────────────────────────────────────────────────────────────────────

async fn upsert_conversation<'e, E>(executor: E, conversation: &Conversation) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO conversations (id, user_id, title, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE SET
            title = EXCLUDED.title,
            updated_at = GREATEST(conversations.updated_at, EXCLUDED.updated_at)
        "#,
    )
    .bind(conversation.id().as_uuid())
    .bind(conversation.owner_id().as_uuid())
    .bind(conversation.title().as_str())
    .bind(conversation.created_at().as_datetime())
    .bind(conversation.updated_at().as_datetime())
    .execute(executor)
    .await
    .map_err(|e| DomainError::database(format!("Failed to save conversation: {}", e)))?;

    Ok(())
}

async fn insert_message<'e, E>(executor: E, message: &Message) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO messages (id, conversation_id, role, content, created_at, tokens_used)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(message.id().as_uuid())
    .bind(message.conversation_id().as_uuid())
    .bind(message.role().as_str())
    .bind(message.content())
    .bind(message.created_at().as_datetime())
    .bind(message.tokens_used().and_then(|t| i32::try_from(t).ok()))
    .execute(executor)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                .with_detail("conversation_id", message.conversation_id().to_string())
        }
        _ => DomainError::database(format!("Failed to insert message: {}", e)),
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Row mapping
// ─────────────────────────────────────────────────────────────────────────────

fn read_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to read row: {}", e))
}

fn row_to_conversation(row: &PgRow) -> Result<Conversation, DomainError> {
    let id: Uuid = row.try_get("id").map_err(read_error)?;
    let user_id: Uuid = row.try_get("user_id").map_err(read_error)?;
    let title: String = row.try_get("title").map_err(read_error)?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(read_error)?;
    let updated_at: chrono::DateTime<chrono::Utc> =
        row.try_get("updated_at").map_err(read_error)?;

    Ok(Conversation::reconstitute(
        ConversationId::from_uuid(id),
        UserId::from_uuid(user_id),
        ConversationTitle::from_trusted(title),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_message(row: &PgRow) -> Result<Message, DomainError> {
    let id: Uuid = row.try_get("id").map_err(read_error)?;
    let conversation_id: Uuid = row.try_get("conversation_id").map_err(read_error)?;
    let role: String = row.try_get("role").map_err(read_error)?;
    let content: String = row.try_get("content").map_err(read_error)?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(read_error)?;
    let tokens_used: Option<i32> = row.try_get("tokens_used").map_err(read_error)?;

    Ok(Message::reconstitute(
        MessageId::from_uuid(id),
        ConversationId::from_uuid(conversation_id),
        role.parse::<Role>()?,
        content,
        Timestamp::from_datetime(created_at),
        tokens_used.and_then(|t| u32::try_from(t).ok()),
    ))
}

//! Postgres-backed conversation history repository

use chatbridge_common::RepositoryError;
use sqlx::types::Json;
use sqlx::PgPool;

use super::HistoryRepository;
use crate::domain::entities::Message;

#[derive(Clone)]
pub struct PgHistoryRepository {
    pool: PgPool,
}

impl PgHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl HistoryRepository for PgHistoryRepository {
    async fn load(&self, user_id: &str) -> Result<Option<Vec<Message>>, RepositoryError> {
        let row = sqlx::query_scalar::<_, serde_json::Value>(
            r#"
            SELECT messages
            FROM conversation_histories
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(value) => {
                let messages: Vec<Message> = serde_json::from_value(value).map_err(|e| {
                    RepositoryError::InvalidData(format!(
                        "Stored history for user {} is malformed: {}",
                        user_id, e
                    ))
                })?;
                Ok(Some(messages))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: &str, messages: &[Message]) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO conversation_histories (user_id, messages, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET messages = EXCLUDED.messages, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(Json(messages))
        .execute(&self.pool)
        .await?;

        tracing::debug!(user_id = %user_id, count = messages.len(), "Saved conversation history");

        Ok(())
    }
}

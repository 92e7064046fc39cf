use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Message, MessageRepository, StoreError};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct MessageModel {
    id: String,
    name: String,
    email: String,
    subject: String,
    body: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageModel> for Message {
    type Error = StoreError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid message id: {}", e)))?;
        Ok(Message {
            id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            body: model.body,
            is_read: model.is_read,
            created_at: model.created_at,
        })
    }
}

pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, StoreError> {
        let model = sqlx::query_as::<_, MessageModel>("SELECT * FROM messages WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Message::try_from).transpose()
    }

    async fn save(&self, message: &Message) -> Result<Message, StoreError> {
        sqlx::query(
            "INSERT INTO messages (id, name, email, subject, body, is_read, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.is_read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(message.clone())
    }

    async fn update(&self, message: &Message) -> Result<Message, StoreError> {
        let result = sqlx::query(
            "UPDATE messages SET name = ?, email = ?, subject = ?, body = ?, is_read = ? \
             WHERE id = ?",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.is_read)
        .bind(message.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MessageNotFound);
        }
        Ok(message.clone())
    }

    async fn find_all(&self) -> Result<Vec<Message>, StoreError> {
        let models =
            sqlx::query_as::<_, MessageModel>("SELECT * FROM messages ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Message::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(())
    }
}

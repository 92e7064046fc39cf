use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{StoreError, Subscriber, SubscriberRepository};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct SubscriberModel {
    id: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubscriberModel> for Subscriber {
    type Error = StoreError;

    fn try_from(model: SubscriberModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid subscriber id: {}", e)))?;
        Ok(Subscriber {
            id,
            email: model.email,
            created_at: model.created_at,
        })
    }
}

pub struct SqliteSubscriberRepository {
    pool: SqlitePool,
}

impl SqliteSubscriberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for SqliteSubscriberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        let model =
            sqlx::query_as::<_, SubscriberModel>("SELECT * FROM subscribers WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Subscriber::try_from).transpose()
    }

    async fn save(&self, subscriber: &Subscriber) -> Result<Subscriber, StoreError> {
        sqlx::query("INSERT INTO subscribers (id, email, created_at) VALUES (?, ?, ?)")
            .bind(subscriber.id.to_string())
            .bind(&subscriber.email)
            .bind(subscriber.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(subscriber.clone())
    }

    async fn find_all(&self) -> Result<Vec<Subscriber>, StoreError> {
        let models =
            sqlx::query_as::<_, SubscriberModel>("SELECT * FROM subscribers ORDER BY created_at")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Subscriber::try_from).collect()
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Offer, OfferRepository, StoreError};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct OfferModel {
    id: String,
    code: String,
    discount_percentage: f64,
    expiration_date: DateTime<Utc>,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OfferModel> for Offer {
    type Error = StoreError;

    fn try_from(model: OfferModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid offer id: {}", e)))?;
        Ok(Offer {
            id,
            code: model.code,
            discount_percentage: model.discount_percentage,
            expiration_date: model.expiration_date,
            description: model.description,
            created_at: model.created_at,
        })
    }
}

pub struct SqliteOfferRepository {
    pool: SqlitePool,
}

impl SqliteOfferRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferRepository for SqliteOfferRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError> {
        let model = sqlx::query_as::<_, OfferModel>("SELECT * FROM offers WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Offer::try_from).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Offer>, StoreError> {
        let model = sqlx::query_as::<_, OfferModel>("SELECT * FROM offers WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Offer::try_from).transpose()
    }

    async fn save(&self, offer: &Offer) -> Result<Offer, StoreError> {
        sqlx::query(
            "INSERT INTO offers (id, code, discount_percentage, expiration_date, description, \
             created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(offer.id.to_string())
        .bind(&offer.code)
        .bind(offer.discount_percentage)
        .bind(offer.expiration_date)
        .bind(&offer.description)
        .bind(offer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        Ok(offer.clone())
    }

    async fn find_all(&self) -> Result<Vec<Offer>, StoreError> {
        let models = sqlx::query_as::<_, OfferModel>("SELECT * FROM offers ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Offer::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM offers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Category, CategoryRepository, StoreError};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct CategoryModel {
    id: String,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CategoryModel> for Category {
    type Error = StoreError;

    fn try_from(model: CategoryModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid category id: {}", e)))?;
        Ok(Category {
            id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
        })
    }
}

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        let model = sqlx::query_as::<_, CategoryModel>("SELECT * FROM categories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Category::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        let model = sqlx::query_as::<_, CategoryModel>("SELECT * FROM categories WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Category::try_from).transpose()
    }

    async fn save(&self, category: &Category) -> Result<Category, StoreError> {
        sqlx::query(
            "INSERT INTO categories (id, name, description, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(category.clone())
    }

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        let models =
            sqlx::query_as::<_, CategoryModel>("SELECT * FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Category::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(())
    }
}

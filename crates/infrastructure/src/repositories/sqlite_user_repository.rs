use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Address, StoreError, User, UserRepository};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct UserModel {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    address: Option<Json<Address>>,
    wishlist: Json<Vec<Uuid>>,
    reset_token_hash: Option<String>,
    reset_token_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserModel> for User {
    type Error = StoreError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid user id: {}", e)))?;
        Ok(User {
            id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            is_admin: model.is_admin,
            address: model.address.map(|json| json.0),
            wishlist: model.wishlist.0,
            reset_token_hash: model.reset_token_hash,
            reset_token_expires: model.reset_token_expires,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_where(
        &self,
        sql: &str,
        bind: String,
    ) -> Result<Option<User>, StoreError> {
        let model = sqlx::query_as::<_, UserModel>(sql)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.find_where("SELECT * FROM users WHERE id = ?", id.to_string())
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_where("SELECT * FROM users WHERE email = ?", email.to_string())
            .await
    }

    async fn find_by_reset_token(&self, token_hash: &str) -> Result<Option<User>, StoreError> {
        self.find_where(
            "SELECT * FROM users WHERE reset_token_hash = ?",
            token_hash.to_string(),
        )
        .await
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, is_admin, address, wishlist, \
             reset_token_hash, reset_token_expires, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.address.as_ref().map(Json))
        .bind(Json(&user.wishlist))
        .bind(&user.reset_token_hash)
        .bind(user.reset_token_expires)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET name = ?, email = ?, password_hash = ?, is_admin = ?, \
             address = ?, wishlist = ?, reset_token_hash = ?, reset_token_expires = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.address.as_ref().map(Json))
        .bind(Json(&user.wishlist))
        .bind(&user.reset_token_hash)
        .bind(user.reset_token_expires)
        .bind(user.updated_at)
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound);
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let models = sqlx::query_as::<_, UserModel>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(User::try_from).collect()
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))
    }

    async fn count_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE created_at >= ? AND created_at <= ?",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use chrono::Duration;

    async fn repository() -> SqliteUserRepository {
        let database = Database::connect("sqlite::memory:").await.unwrap();
        SqliteUserRepository::new(database.get_pool())
    }

    #[tokio::test]
    async fn wishlist_and_address_round_trip() {
        let repo = repository().await;
        let mut user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        user.wishlist = vec![Uuid::new_v4(), Uuid::new_v4()];
        user.address = Some(Address {
            street: "12 Lake Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip: "411001".to_string(),
            country: "India".to_string(),
        });
        repo.save(&user).await.unwrap();

        let loaded = repo.find_by_email("jane@example.com").await.unwrap().unwrap();
        assert_eq!(loaded.id, user.id);
        assert_eq!(loaded.wishlist, user.wishlist);
        assert_eq!(loaded.address, user.address);
    }

    #[tokio::test]
    async fn duplicate_email_violates_unique_index() {
        let repo = repository().await;
        let user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        repo.save(&user).await.unwrap();

        let twin = User::new(
            "Other".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        assert!(matches!(
            repo.save(&twin).await,
            Err(StoreError::RepositoryError(_))
        ));
    }

    #[tokio::test]
    async fn reset_token_lookup_and_clear() {
        let repo = repository().await;
        let mut user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        user.reset_token_hash = Some("abc123".to_string());
        user.reset_token_expires = Some(Utc::now() + Duration::minutes(10));
        repo.save(&user).await.unwrap();

        let found = repo.find_by_reset_token("abc123").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        let mut cleared = found;
        cleared.clear_reset_token();
        repo.update(&cleared).await.unwrap();
        assert!(repo.find_by_reset_token("abc123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn creation_window_counts_inclusively() {
        let repo = repository().await;
        let user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        );
        repo.save(&user).await.unwrap();

        let now = Utc::now();
        let inside = repo
            .count_created_between(now - Duration::hours(1), now + Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(inside, 1);

        let outside = repo
            .count_created_between(now + Duration::hours(1), now + Duration::hours(2))
            .await
            .unwrap();
        assert_eq!(outside, 0);
    }
}

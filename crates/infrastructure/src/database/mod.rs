use domain::StoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub mod schema;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the SQLite database at `database_url`
    /// and brings the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?
            .create_if_missing(true);

        let mut builder = SqlitePoolOptions::new().max_connections(5);
        if database_url.contains(":memory:") {
            // A private in-memory database lives exactly as long as its
            // connection, so the pool must hold a single permanent one.
            builder = builder
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = builder
            .connect_with(options)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        for statement in schema::TABLES {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        }

        Ok(Database { pool })
    }

    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }
}

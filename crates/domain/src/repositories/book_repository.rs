use crate::entities::Book;
use crate::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

/// Catalog listing filter. Set fields combine with AND; keyword is a
/// case-insensitive substring match on the title.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub bestseller: Option<bool>,
}

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError>;
    async fn find_filtered(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError>;
    async fn save(&self, book: &Book) -> Result<Book, StoreError>;
    async fn update(&self, book: &Book) -> Result<Book, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
    async fn count(&self) -> Result<i64, StoreError>;
}

use crate::entities::Category;
use crate::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError>;
    async fn save(&self, category: &Category) -> Result<Category, StoreError>;
    async fn find_all(&self) -> Result<Vec<Category>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

use crate::entities::Message;
use crate::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, StoreError>;
    async fn save(&self, message: &Message) -> Result<Message, StoreError>;
    async fn update(&self, message: &Message) -> Result<Message, StoreError>;
    async fn find_all(&self) -> Result<Vec<Message>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

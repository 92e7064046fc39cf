use crate::entities::Subscriber;
use crate::errors::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError>;
    async fn save(&self, subscriber: &Subscriber) -> Result<Subscriber, StoreError>;
    async fn find_all(&self) -> Result<Vec<Subscriber>, StoreError>;
}

use crate::entities::Offer;
use crate::errors::StoreError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Offer>, StoreError>;
    async fn save(&self, offer: &Offer) -> Result<Offer, StoreError>;
    async fn find_all(&self) -> Result<Vec<Offer>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

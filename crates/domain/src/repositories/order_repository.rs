use crate::entities::Order;
use crate::errors::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One stock deduction applied while an order commits. The title rides
/// along so a failed line can be reported by name.
#[derive(Debug, Clone)]
pub struct StockDecrement {
    pub book_id: Uuid,
    pub qty: i64,
    pub title: String,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persists the order and applies every stock decrement atomically.
    /// A missing book or a short stock on any line aborts the whole batch
    /// and leaves every stock value untouched.
    async fn create(
        &self,
        order: &Order,
        decrements: &[StockDecrement],
    ) -> Result<Order, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError>;
    async fn find_all(&self) -> Result<Vec<Order>, StoreError>;
    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, StoreError>;
    async fn update(&self, order: &Order) -> Result<Order, StoreError>;
}

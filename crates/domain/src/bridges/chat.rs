use crate::errors::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

#[async_trait]
pub trait ChatForwarder: Send + Sync {
    /// Relays a support message to the automation webhook and returns the
    /// webhook's JSON reply verbatim.
    async fn forward(
        &self,
        chat_id: &str,
        user_id: Uuid,
        message: &str,
    ) -> Result<Value, StoreError>;
}

use crate::errors::StoreError;
use async_trait::async_trait;
use serde::Deserialize;

/// Session created on the remote gateway, one per payable order. Amounts
/// are minor units (paise).
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, StoreError>;
}

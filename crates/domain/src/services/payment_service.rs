use crate::bridges::PaymentGateway;
use crate::entities::{Order, PaymentResult};
use crate::errors::StoreError;
use crate::repositories::OrderRepository;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// What the storefront needs to open the gateway's checkout widget.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSession {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key: String,
}

/// Callback payload posted by the storefront after the gateway widget
/// completes. `order_id` is our order; the `razorpay_*` fields identify
/// the gateway-side transaction and carry its signature.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "orderId")]
    pub order_id: Uuid,
}

/// Bridges checkout to the payment gateway: opens gateway orders and
/// verifies callback signatures before an order may be marked paid.
pub struct PaymentService {
    order_repository: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    key_id: String,
    key_secret: String,
}

impl PaymentService {
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
        key_id: String,
        key_secret: String,
    ) -> Self {
        Self {
            order_repository,
            gateway,
            key_id,
            key_secret,
        }
    }

    /// Opens a gateway order for the given store order. The amount is
    /// converted to the smallest currency unit.
    pub async fn create_session(&self, order_id: Uuid) -> Result<PaymentSession, StoreError> {
        let order = self.find_order(order_id).await?;
        let amount = (order.total_price * 100.0).round() as i64;
        let gateway_order = self
            .gateway
            .create_order(amount, "INR", &order.id.to_string())
            .await?;
        Ok(PaymentSession {
            order_id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            key: self.key_id.clone(),
        })
    }

    /// Checks the gateway's HMAC signature over `"<gateway order>|<payment>"`
    /// in constant time, then marks the order paid. A second verification
    /// of an already-paid order leaves the original payment record intact.
    pub async fn verify(&self, request: VerifyRequest) -> Result<Order, StoreError> {
        let supplied =
            hex::decode(&request.razorpay_signature).map_err(|_| StoreError::InvalidSignature)?;
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        mac.update(
            format!(
                "{}|{}",
                request.razorpay_order_id, request.razorpay_payment_id
            )
            .as_bytes(),
        );
        mac.verify_slice(&supplied)
            .map_err(|_| StoreError::InvalidSignature)?;

        let mut order = self.find_order(request.order_id).await?;
        order.mark_paid(PaymentResult {
            id: request.razorpay_payment_id,
            status: "success".to_string(),
            update_time: Utc::now().timestamp_millis().to_string(),
            email_address: String::new(),
        });
        self.order_repository.update(&order).await
    }

    async fn find_order(&self, id: Uuid) -> Result<Order, StoreError> {
        match self.order_repository.find_by_id(id).await? {
            Some(order) => Ok(order),
            None => Err(StoreError::OrderNotFound),
        }
    }
}

use async_trait::async_trait;
use domain::{GatewayOrder, PaymentGateway, StoreError};
use serde_json::json;

/// Razorpay Orders API client. Amounts are minor units; auth is HTTP
/// basic with the key pair.
pub struct RazorpayGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(base_url: String, key_id: String, key_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            key_id,
            key_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, StoreError> {
        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
                "payment_capture": 1,
            }))
            .send()
            .await
            .map_err(|e| {
                StoreError::GatewayError(format!("Payment gateway request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let description = response.json::<serde_json::Value>().await.ok().and_then(
                |body| {
                    body.get("error")
                        .and_then(|error| error.get("description"))
                        .and_then(|description| description.as_str())
                        .map(str::to_string)
                },
            );
            return Err(StoreError::GatewayError(description.unwrap_or_else(
                || format!("Payment gateway returned status: {}", status),
            )));
        }

        response.json::<GatewayOrder>().await.map_err(|e| {
            StoreError::GatewayError(format!("Invalid payment gateway response: {}", e))
        })
    }
}

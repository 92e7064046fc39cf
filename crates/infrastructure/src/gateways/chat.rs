use async_trait::async_trait;
use domain::{ChatForwarder, StoreError};
use serde_json::{json, Value};
use uuid::Uuid;

/// Relays support-chat messages to the automation webhook and hands its
/// JSON reply back unchanged.
pub struct WebhookChatForwarder {
    client: reqwest::Client,
    webhook_url: String,
}

impl WebhookChatForwarder {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }
}

#[async_trait]
impl ChatForwarder for WebhookChatForwarder {
    async fn forward(
        &self,
        chat_id: &str,
        user_id: Uuid,
        message: &str,
    ) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&json!({
                "chatId": chat_id,
                "userId": user_id,
                "message": message,
            }))
            .send()
            .await
            .map_err(|_| unreachable_webhook())?;

        if !response.status().is_success() {
            return Err(unreachable_webhook());
        }

        response.json::<Value>().await.map_err(|_| unreachable_webhook())
    }
}

fn unreachable_webhook() -> StoreError {
    StoreError::GatewayError("Failed to communicate with AI service".to_string())
}

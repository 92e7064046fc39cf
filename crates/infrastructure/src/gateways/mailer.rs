use async_trait::async_trait;
use domain::{Email, Mailer, StoreError};
use serde_json::json;

/// Transactional mail over the provider's REST API. Without an api key
/// the mail is only logged, never sent.
pub struct HttpMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(base_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: Email) -> Result<(), StoreError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::info!("mail (mock) to {}: {}", email.to, email.subject);
                return Ok(());
            }
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&json!({
                "from": self.from,
                "to": [email.to],
                "subject": email.subject,
                "html": email.html,
            }))
            .send()
            .await
            .map_err(|e| StoreError::GatewayError(format!("Mail request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::FORBIDDEN {
            // Sandbox keys refuse unverified recipients.
            tracing::warn!("mail provider refused recipient {}", email.to);
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(StoreError::GatewayError(format!(
                "Mail provider returned status: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

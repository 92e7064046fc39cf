use crate::errors::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), StoreError>;
}

/// Dispatches an email on a detached task. The request path never waits
/// on delivery and a failure only produces a log line.
pub fn send_detached(mailer: Arc<dyn Mailer>, email: Email) {
    tokio::spawn(async move {
        let to = email.to.clone();
        if let Err(err) = mailer.send(email).await {
            tracing::warn!("failed to send email to {}: {}", to, err);
        }
    });
}

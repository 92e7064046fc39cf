use crate::bridges::{send_detached, Email, Mailer};
use crate::entities::Subscriber;
use crate::errors::StoreError;
use crate::repositories::SubscriberRepository;
use crate::templates;
use std::sync::Arc;

/// Newsletter signups and admin broadcasts. All mail goes out on
/// detached tasks so neither path blocks on the provider.
pub struct NewsletterService {
    subscriber_repository: Arc<dyn SubscriberRepository>,
    mailer: Arc<dyn Mailer>,
}

impl NewsletterService {
    pub fn new(
        subscriber_repository: Arc<dyn SubscriberRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            subscriber_repository,
            mailer,
        }
    }

    pub async fn subscribe(&self, email: String) -> Result<Subscriber, StoreError> {
        let subscriber = Subscriber::new(email);
        subscriber.validate()?;
        if self
            .subscriber_repository
            .find_by_email(&subscriber.email)
            .await?
            .is_some()
        {
            return Err(StoreError::ValidationError(
                "This email is already subscribed".to_string(),
            ));
        }
        let saved = self.subscriber_repository.save(&subscriber).await?;

        send_detached(
            self.mailer.clone(),
            Email {
                to: saved.email.clone(),
                subject: "Welcome to BookHaven Newsletter!".to_string(),
                html: templates::welcome_html(),
            },
        );

        Ok(saved)
    }

    /// Mails every subscriber and reports how many sends were dispatched.
    pub async fn broadcast(&self, subject: &str, html: &str) -> Result<usize, StoreError> {
        if subject.trim().is_empty() || html.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "Please provide subject and message".to_string(),
            ));
        }
        let subscribers = self.subscriber_repository.find_all().await?;
        for subscriber in &subscribers {
            send_detached(
                self.mailer.clone(),
                Email {
                    to: subscriber.email.clone(),
                    subject: subject.to_string(),
                    html: html.to_string(),
                },
            );
        }
        Ok(subscribers.len())
    }
}

use crate::entities::Message;
use crate::errors::StoreError;
use crate::repositories::MessageRepository;
use std::sync::Arc;

/// Contact-form inbox: public submission, admin triage.
pub struct MessageService {
    message_repository: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(message_repository: Arc<dyn MessageRepository>) -> Self {
        Self { message_repository }
    }

    pub async fn create_message(
        &self,
        name: String,
        email: String,
        subject: String,
        body: String,
    ) -> Result<Message, StoreError> {
        let message = Message::new(name, email, subject, body);
        message.validate()?;
        self.message_repository.save(&message).await
    }

    pub async fn list_messages(&self) -> Result<Vec<Message>, StoreError> {
        self.message_repository.find_all().await
    }

    pub async fn mark_read(&self, id: uuid::Uuid) -> Result<Message, StoreError> {
        let mut message = match self.message_repository.find_by_id(id).await? {
            Some(message) => message,
            None => return Err(StoreError::MessageNotFound),
        };
        message.mark_read();
        self.message_repository.update(&message).await
    }

    pub async fn delete_message(&self, id: uuid::Uuid) -> Result<(), StoreError> {
        if self.message_repository.find_by_id(id).await?.is_none() {
            return Err(StoreError::MessageNotFound);
        }
        self.message_repository.delete(id).await
    }
}

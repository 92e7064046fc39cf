use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;

/// Contact-form submission reviewed from the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(rename = "message")]
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(name: String, email: String, subject: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            body,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.body.trim().is_empty()
        {
            return Err(StoreError::ValidationError(
                "Please fill all required fields".to_string(),
            ));
        }
        Ok(())
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

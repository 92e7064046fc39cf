use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;

/// Newsletter subscription, one row per address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.email.trim().is_empty() {
            return Err(StoreError::ValidationError(
                "Please provide an email".to_string(),
            ));
        }
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;

/// Checkout promo code. Validated at checkout, never consumed, so there is
/// no redemption bookkeeping here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub code: String,
    pub discount_percentage: f64,
    pub expiration_date: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(
        code: String,
        discount_percentage: f64,
        expiration_date: DateTime<Utc>,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            discount_percentage,
            expiration_date,
            description,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.code.trim().is_empty() {
            return Err(StoreError::ValidationError("Code cannot be empty".to_string()));
        }
        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(StoreError::ValidationError(
                "Discount must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.expiration_date < Utc::now()
    }
}

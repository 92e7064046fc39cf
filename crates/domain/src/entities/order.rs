use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;

/// Fulfilment states, spelled exactly as the storefront displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Packed,
    Shipped,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
    Returned,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
            OrderStatus::Refunded => "Refunded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(OrderStatus::Pending),
            "Confirmed" => Some(OrderStatus::Confirmed),
            "Processing" => Some(OrderStatus::Processing),
            "Packed" => Some(OrderStatus::Packed),
            "Shipped" => Some(OrderStatus::Shipped),
            "Out for Delivery" => Some(OrderStatus::OutForDelivery),
            "Delivered" => Some(OrderStatus::Delivered),
            "Cancelled" => Some(OrderStatus::Cancelled),
            "Returned" => Some(OrderStatus::Returned),
            "Refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }

    /// An order can be cancelled until it physically leaves the warehouse.
    pub fn cancellable(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending
                | OrderStatus::Confirmed
                | OrderStatus::Processing
                | OrderStatus::Packed
        )
    }
}

/// One purchased line. `book_id` serializes as `product`, the name the
/// storefront uses for the catalog reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub title: String,
    pub qty: i64,
    pub image: String,
    pub price: f64,
    #[serde(rename = "product")]
    pub book_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Gateway confirmation recorded when a payment verifies. Field names are
/// the gateway's own, so no casing rename here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub id: String,
    pub status: String,
    pub update_time: String,
    pub email_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_result: Option<PaymentResult>,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    pub is_delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Uuid,
        order_items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        payment_method: String,
        items_price: f64,
        tax_price: f64,
        shipping_price: f64,
        total_price: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            order_items,
            shipping_address,
            payment_method,
            payment_result: None,
            items_price,
            tax_price,
            shipping_price,
            total_price,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.order_items.is_empty() {
            return Err(StoreError::ValidationError("No order items".to_string()));
        }
        for item in &self.order_items {
            if item.qty < 1 {
                return Err(StoreError::ValidationError(format!(
                    "Invalid quantity for {}",
                    item.title
                )));
            }
        }
        Ok(())
    }

    /// Records a verified payment. Re-verifying an already paid order is a
    /// no-op so the first confirmation is the one that sticks.
    pub fn mark_paid(&mut self, result: PaymentResult) {
        if self.is_paid {
            return;
        }
        self.is_paid = true;
        self.paid_at = Some(Utc::now());
        self.payment_result = Some(result);
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        if status == OrderStatus::Delivered {
            self.is_delivered = true;
            self.delivered_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }

    pub fn cancel(&mut self) -> Result<(), StoreError> {
        if !self.status.cancellable() {
            return Err(StoreError::InvalidStateTransition(
                self.status.as_str().to_string(),
            ));
        }
        self.set_status(OrderStatus::Cancelled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order::new(
            Uuid::new_v4(),
            vec![OrderItem {
                title: "The Midnight Library".to_string(),
                qty: 2,
                image: "/images/midnight.jpg".to_string(),
                price: 100.0,
                book_id: Uuid::new_v4(),
            }],
            ShippingAddress {
                address: "12 Lake Road".to_string(),
                city: "Pune".to_string(),
                postal_code: "411001".to_string(),
                country: "India".to_string(),
            },
            "Razorpay".to_string(),
            200.0,
            0.0,
            49.0,
            249.0,
        )
    }

    #[test]
    fn new_order_starts_pending_and_unpaid() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_paid);
        assert!(!order.is_delivered);
        assert!(order.paid_at.is_none());
    }

    #[test]
    fn empty_order_fails_validation() {
        let mut order = sample_order();
        order.order_items.clear();
        assert!(matches!(
            order.validate(),
            Err(StoreError::ValidationError(_))
        ));
    }

    #[test]
    fn cancel_allowed_before_shipping() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Packed,
        ] {
            let mut order = sample_order();
            order.status = status;
            assert!(order.cancel().is_ok());
            assert_eq!(order.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn cancel_rejected_after_shipping() {
        for status in [
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
            OrderStatus::Refunded,
        ] {
            let mut order = sample_order();
            order.status = status;
            let err = order.cancel().unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Cannot cancel order that is {}", status.as_str())
            );
            assert_eq!(order.status, status);
        }
    }

    #[test]
    fn mark_paid_keeps_first_confirmation() {
        let mut order = sample_order();
        order.mark_paid(PaymentResult {
            id: "pay_first".to_string(),
            status: "success".to_string(),
            update_time: "1700000000000".to_string(),
            email_address: String::new(),
        });
        let first_paid_at = order.paid_at;

        order.mark_paid(PaymentResult {
            id: "pay_second".to_string(),
            status: "success".to_string(),
            update_time: "1700000099000".to_string(),
            email_address: String::new(),
        });

        assert!(order.is_paid);
        assert_eq!(order.paid_at, first_paid_at);
        assert_eq!(
            order.payment_result.as_ref().map(|r| r.id.as_str()),
            Some("pay_first")
        );
    }

    #[test]
    fn delivered_status_stamps_delivery() {
        let mut order = sample_order();
        order.set_status(OrderStatus::Delivered);
        assert!(order.is_delivered);
        assert!(order.delivered_at.is_some());
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn status_wire_names_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::OutForDelivery,
            OrderStatus::Refunded,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"Out for Delivery\""
        );
    }
}

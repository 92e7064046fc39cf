use crate::bridges::{send_detached, Email, Mailer};
use crate::entities::{Order, OrderItem, OrderStatus, ShippingAddress, User};
use crate::errors::StoreError;
use crate::repositories::{
    BookRepository, OfferRepository, OrderRepository, StockDecrement, UserRepository,
};
use crate::templates;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Orders under this subtotal pay a flat shipping fee.
const FREE_SHIPPING_THRESHOLD: f64 = 499.0;
const SHIPPING_FEE: f64 = 49.0;
/// Client totals may drift from the recomputed ones by at most a cent.
const TOTAL_TOLERANCE: f64 = 0.01;

/// Checkout payload as the storefront submits it. Prices are recomputed
/// from the catalog; the client's figures are only accepted when they
/// agree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<DraftItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: f64,
    #[serde(default)]
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    #[serde(default)]
    pub offer_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub title: String,
    pub qty: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "product")]
    pub book_id: Uuid,
}

/// Back-office dashboard aggregates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_orders: i64,
    pub total_sales: f64,
    pub total_paid_orders: i64,
    pub total_users: i64,
    pub total_books: i64,
}

/// Checkout, fulfilment tracking, cancellation, and dashboard stats.
pub struct OrderService {
    order_repository: Arc<dyn OrderRepository>,
    book_repository: Arc<dyn BookRepository>,
    user_repository: Arc<dyn UserRepository>,
    offer_repository: Arc<dyn OfferRepository>,
    mailer: Arc<dyn Mailer>,
}

impl OrderService {
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        book_repository: Arc<dyn BookRepository>,
        user_repository: Arc<dyn UserRepository>,
        offer_repository: Arc<dyn OfferRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            order_repository,
            book_repository,
            user_repository,
            offer_repository,
            mailer,
        }
    }

    /// Places an order: prices every line from the catalog, checks the
    /// client's totals, and commits the order together with all stock
    /// decrements in one transaction. The invoice email is dispatched
    /// after commit on a detached task.
    pub async fn create_order(&self, user: &User, draft: OrderDraft) -> Result<Order, StoreError> {
        if draft.order_items.is_empty() {
            return Err(StoreError::ValidationError("No order items".to_string()));
        }

        let mut items = Vec::with_capacity(draft.order_items.len());
        let mut decrements = Vec::with_capacity(draft.order_items.len());
        let mut subtotal = 0.0;

        for line in &draft.order_items {
            if line.qty < 1 {
                return Err(StoreError::ValidationError(format!(
                    "Invalid quantity for {}",
                    line.title
                )));
            }
            let book = match self.book_repository.find_by_id(line.book_id).await? {
                Some(book) => book,
                None => return Err(StoreError::OrderItemNotFound(line.title.clone())),
            };
            if book.stock < line.qty {
                return Err(StoreError::InsufficientStock(book.title.clone()));
            }

            subtotal += book.price * line.qty as f64;
            items.push(OrderItem {
                title: book.title.clone(),
                qty: line.qty,
                image: book.cover_image.clone(),
                price: book.price,
                book_id: book.id,
            });
            decrements.push(StockDecrement {
                book_id: book.id,
                qty: line.qty,
                title: book.title,
            });
        }

        let discount = self.discount_for(&draft.offer_code, subtotal).await?;
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            SHIPPING_FEE
        };
        let total = subtotal - discount + shipping;

        let mismatch = (draft.items_price - subtotal).abs() > TOTAL_TOLERANCE
            || (draft.shipping_price - shipping).abs() > TOTAL_TOLERANCE
            || (draft.total_price - total).abs() > TOTAL_TOLERANCE;
        if mismatch {
            return Err(StoreError::ValidationError(
                "Order totals do not match current prices".to_string(),
            ));
        }

        let order = Order::new(
            user.id,
            items,
            draft.shipping_address,
            draft.payment_method,
            subtotal,
            draft.tax_price,
            shipping,
            total,
        );
        order.validate()?;

        let created = self.order_repository.create(&order, &decrements).await?;

        send_detached(
            self.mailer.clone(),
            Email {
                to: user.email.clone(),
                subject: format!("Invoice for Order #{} - BookHaven", created.id),
                html: templates::invoice_html(&created, user),
            },
        );

        Ok(created)
    }

    /// Owner-or-admin read.
    pub async fn get_order(&self, id: Uuid, requester: &User) -> Result<Order, StoreError> {
        let order = self.find_order(id).await?;
        if order.user_id != requester.id && !requester.is_admin {
            return Err(StoreError::Forbidden(
                "Not authorized to view this order".to_string(),
            ));
        }
        Ok(order)
    }

    pub async fn my_orders(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        self.order_repository.find_by_user(user_id).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.order_repository.find_all().await
    }

    pub async fn cancel_order(&self, id: Uuid, requester: &User) -> Result<Order, StoreError> {
        let mut order = self.find_order(id).await?;
        if order.user_id != requester.id && !requester.is_admin {
            return Err(StoreError::Forbidden(
                "Not authorized to cancel this order".to_string(),
            ));
        }
        order.cancel()?;
        self.order_repository.update(&order).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let mut order = self.find_order(id).await?;
        order.set_status(status);
        self.order_repository.update(&order).await
    }

    pub async fn mark_delivered(&self, id: Uuid) -> Result<Order, StoreError> {
        self.update_status(id, OrderStatus::Delivered).await
    }

    /// Dashboard aggregates, optionally restricted to a creation-date
    /// window. The end date is inclusive through its last millisecond.
    pub async fn stats(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<SalesStats, StoreError> {
        let bounds = range.and_then(|(start, end)| day_bounds(start, end));
        let (orders, total_users) = match bounds {
            Some((start, end)) => (
                self.order_repository
                    .find_created_between(start, end)
                    .await?,
                self.user_repository
                    .count_created_between(start, end)
                    .await?,
            ),
            None => (
                self.order_repository.find_all().await?,
                self.user_repository.count().await?,
            ),
        };
        let total_books = self.book_repository.count().await?;

        let total_orders = orders.len() as i64;
        let total_paid_orders = orders.iter().filter(|order| order.is_paid).count() as i64;
        let total_sales = orders
            .iter()
            .filter(|order| order.is_paid)
            .map(|order| order.total_price)
            .sum();

        Ok(SalesStats {
            total_orders,
            total_sales,
            total_paid_orders,
            total_users,
            total_books,
        })
    }

    async fn find_order(&self, id: Uuid) -> Result<Order, StoreError> {
        match self.order_repository.find_by_id(id).await? {
            Some(order) => Ok(order),
            None => Err(StoreError::OrderNotFound),
        }
    }

    async fn discount_for(
        &self,
        offer_code: &Option<String>,
        subtotal: f64,
    ) -> Result<f64, StoreError> {
        let code = match offer_code.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => return Ok(0.0),
        };
        let offer = match self.offer_repository.find_by_code(code).await? {
            Some(offer) => offer,
            None => {
                return Err(StoreError::ValidationError(
                    "Invalid offer code".to_string(),
                ))
            }
        };
        if offer.is_expired() {
            return Err(StoreError::ValidationError("Offer has expired".to_string()));
        }
        Ok((subtotal * offer.discount_percentage / 100.0).round())
    }
}

fn day_bounds(start: NaiveDate, end: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_at = start.and_hms_opt(0, 0, 0)?.and_utc();
    let end_at = end.and_hms_milli_opt(23, 59, 59, 999)?.and_utc();
    Some((start_at, end_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Book, Offer};
    use crate::services::test_support::{
        InMemoryBooks, InMemoryOffers, InMemoryOrders, InMemoryUsers, RecordingMailer,
    };
    use chrono::Duration;
    use tokio::time::{sleep, Duration as TokioDuration};

    struct Fixture {
        service: OrderService,
        books: Arc<InMemoryBooks>,
        orders: Arc<InMemoryOrders>,
        offers: Arc<InMemoryOffers>,
        mailer: Arc<RecordingMailer>,
    }

    fn fixture() -> Fixture {
        let books = Arc::new(InMemoryBooks::default());
        let users = Arc::new(InMemoryUsers::default());
        let orders = Arc::new(InMemoryOrders::new(books.clone()));
        let offers = Arc::new(InMemoryOffers::default());
        let mailer = Arc::new(RecordingMailer::default());
        let service = OrderService::new(
            orders.clone(),
            books.clone(),
            users,
            offers.clone(),
            mailer.clone(),
        );
        Fixture {
            service,
            books,
            orders,
            offers,
            mailer,
        }
    }

    fn buyer() -> User {
        User::new(
            "Jane Reader".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
        )
    }

    async fn seed_book(books: &InMemoryBooks, title: &str, price: f64, stock: i64) -> Book {
        let mut book = Book::new(
            title.to_string(),
            "Author".to_string(),
            "Description".to_string(),
            price,
            "Fiction".to_string(),
        );
        book.stock = stock;
        books.insert(book.clone()).await;
        book
    }

    fn draft_for(book: &Book, qty: i64, items: f64, shipping: f64, total: f64) -> OrderDraft {
        OrderDraft {
            order_items: vec![DraftItem {
                title: book.title.clone(),
                qty,
                image: book.cover_image.clone(),
                price: book.price,
                book_id: book.id,
            }],
            shipping_address: ShippingAddress {
                address: "12 Lake Road".to_string(),
                city: "Pune".to_string(),
                postal_code: "411001".to_string(),
                country: "India".to_string(),
            },
            payment_method: "razorpay".to_string(),
            items_price: items,
            tax_price: 0.0,
            shipping_price: shipping,
            total_price: total,
            offer_code: None,
        }
    }

    #[tokio::test]
    async fn create_decrements_stock_and_recomputes_totals() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        let user = buyer();

        let order = fx
            .service
            .create_order(&user, draft_for(&book, 2, 200.0, 49.0, 249.0))
            .await
            .unwrap();

        assert_eq!(order.items_price, 200.0);
        assert_eq!(order.shipping_price, 49.0);
        assert_eq!(order.total_price, 249.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_paid);
        assert_eq!(fx.books.stock_of(book.id).await, Some(1));
    }

    #[tokio::test]
    async fn free_shipping_above_threshold() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Boxed Set", 500.0, 5).await;
        let user = buyer();

        let order = fx
            .service
            .create_order(&user, draft_for(&book, 1, 500.0, 0.0, 500.0))
            .await
            .unwrap();

        assert_eq!(order.shipping_price, 0.0);
        assert_eq!(order.total_price, 500.0);
    }

    #[tokio::test]
    async fn short_stock_aborts_without_touching_any_stock() {
        let fx = fixture();
        let plenty = seed_book(&fx.books, "Plenty", 100.0, 10).await;
        let scarce = seed_book(&fx.books, "Scarce", 100.0, 1).await;
        let user = buyer();

        let mut draft = draft_for(&plenty, 2, 500.0, 49.0, 549.0);
        draft.order_items.push(DraftItem {
            title: scarce.title.clone(),
            qty: 3,
            image: String::new(),
            price: scarce.price,
            book_id: scarce.id,
        });

        let err = fx.service.create_order(&user, draft).await.unwrap_err();
        assert_eq!(err.to_string(), "Not enough stock for Scarce");
        assert_eq!(fx.books.stock_of(plenty.id).await, Some(10));
        assert_eq!(fx.books.stock_of(scarce.id).await, Some(1));
        assert!(fx.orders.all().await.is_empty());
    }

    #[tokio::test]
    async fn missing_book_names_the_title() {
        let fx = fixture();
        let user = buyer();
        let mut ghost = Book::new(
            "Ghost".to_string(),
            "A".to_string(),
            "D".to_string(),
            10.0,
            "Fiction".to_string(),
        );
        ghost.stock = 1;

        let err = fx
            .service
            .create_order(&user, draft_for(&ghost, 1, 10.0, 49.0, 59.0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Book not found: Ghost");
    }

    #[tokio::test]
    async fn tampered_totals_are_rejected() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        let user = buyer();

        let err = fx
            .service
            .create_order(&user, draft_for(&book, 2, 200.0, 49.0, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationError(_)));
        assert_eq!(fx.books.stock_of(book.id).await, Some(3));
    }

    #[tokio::test]
    async fn valid_offer_code_discounts_the_total() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        fx.offers
            .insert(Offer::new(
                "WELCOME10".to_string(),
                10.0,
                Utc::now() + Duration::days(30),
                "Welcome offer: 10% off".to_string(),
            ))
            .await;
        let user = buyer();

        let mut draft = draft_for(&book, 2, 200.0, 49.0, 229.0);
        draft.offer_code = Some("WELCOME10".to_string());

        let order = fx.service.create_order(&user, draft).await.unwrap();
        assert_eq!(order.total_price, 229.0);
    }

    #[tokio::test]
    async fn expired_offer_code_is_rejected() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        fx.offers
            .insert(Offer::new(
                "OLD".to_string(),
                10.0,
                Utc::now() - Duration::days(1),
                String::new(),
            ))
            .await;
        let user = buyer();

        let mut draft = draft_for(&book, 2, 200.0, 49.0, 229.0);
        draft.offer_code = Some("OLD".to_string());

        let err = fx.service.create_order(&user, draft).await.unwrap_err();
        assert_eq!(err.to_string(), "Offer has expired");
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let fx = fixture();
        let user = buyer();
        let draft = OrderDraft {
            order_items: Vec::new(),
            shipping_address: ShippingAddress::default(),
            payment_method: "razorpay".to_string(),
            items_price: 0.0,
            tax_price: 0.0,
            shipping_price: 0.0,
            total_price: 0.0,
            offer_code: None,
        };

        let err = fx.service.create_order(&user, draft).await.unwrap_err();
        assert_eq!(err.to_string(), "No order items");
    }

    #[tokio::test]
    async fn invoice_email_is_sent_after_commit() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        let user = buyer();

        let order = fx
            .service
            .create_order(&user, draft_for(&book, 2, 200.0, 49.0, 249.0))
            .await
            .unwrap();
        sleep(TokioDuration::from_millis(50)).await;

        let sent = fx.mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
        assert!(sent[0].subject.contains(&order.id.to_string()));
    }

    #[tokio::test]
    async fn strangers_cannot_read_or_cancel() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        let owner = buyer();
        let order = fx
            .service
            .create_order(&owner, draft_for(&book, 1, 100.0, 49.0, 149.0))
            .await
            .unwrap();

        let stranger = User::new(
            "Stranger".to_string(),
            "s@example.com".to_string(),
            "hash".to_string(),
        );
        assert!(matches!(
            fx.service.get_order(order.id, &stranger).await,
            Err(StoreError::Forbidden(_))
        ));
        assert!(matches!(
            fx.service.cancel_order(order.id, &stranger).await,
            Err(StoreError::Forbidden(_))
        ));

        let mut admin = stranger;
        admin.is_admin = true;
        assert!(fx.service.get_order(order.id, &admin).await.is_ok());
    }

    #[tokio::test]
    async fn cancel_respects_the_state_machine() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 9).await;
        let owner = buyer();
        let order = fx
            .service
            .create_order(&owner, draft_for(&book, 1, 100.0, 49.0, 149.0))
            .await
            .unwrap();

        let cancelled = fx.service.cancel_order(order.id, &owner).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let err = fx
            .service
            .cancel_order(order.id, &owner)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot cancel order that is Cancelled");
    }

    #[tokio::test]
    async fn admin_delivered_update_stamps_delivery() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 3).await;
        let owner = buyer();
        let order = fx
            .service
            .create_order(&owner, draft_for(&book, 1, 100.0, 49.0, 149.0))
            .await
            .unwrap();

        let delivered = fx.service.mark_delivered(order.id).await.unwrap();
        assert!(delivered.is_delivered);
        assert!(delivered.delivered_at.is_some());
        assert_eq!(delivered.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn stats_count_only_paid_sales() {
        let fx = fixture();
        let book = seed_book(&fx.books, "Dune", 100.0, 10).await;
        let owner = buyer();

        let paid = fx
            .service
            .create_order(&owner, draft_for(&book, 1, 100.0, 49.0, 149.0))
            .await
            .unwrap();
        fx.service
            .create_order(&owner, draft_for(&book, 2, 200.0, 49.0, 249.0))
            .await
            .unwrap();

        let mut order = fx.orders.get(paid.id).await.unwrap();
        order.mark_paid(crate::entities::PaymentResult {
            id: "pay_1".to_string(),
            status: "success".to_string(),
            update_time: "0".to_string(),
            email_address: String::new(),
        });
        fx.orders.put(order).await;

        let stats = fx.service.stats(None).await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_paid_orders, 1);
        assert_eq!(stats.total_sales, 149.0);
        assert_eq!(stats.total_books, 1);
    }
}

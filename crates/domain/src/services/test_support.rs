//! In-memory repository and bridge doubles shared by the service tests.

use crate::bridges::{Email, GatewayOrder, Mailer, PaymentGateway};
use crate::entities::{Book, Category, Message, Offer, Order, Subscriber, User};
use crate::errors::StoreError;
use crate::repositories::{
    BookFilter, BookRepository, CategoryRepository, MessageRepository, OfferRepository,
    OrderRepository, StockDecrement, SubscriberRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct InMemoryBooks {
    rows: Mutex<HashMap<Uuid, Book>>,
}

impl InMemoryBooks {
    pub(crate) async fn insert(&self, book: Book) {
        self.rows.lock().await.insert(book.id, book);
    }

    pub(crate) async fn stock_of(&self, id: Uuid) -> Option<i64> {
        self.rows.lock().await.get(&id).map(|book| book.stock)
    }
}

#[async_trait]
impl BookRepository for InMemoryBooks {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_filtered(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let keyword = filter.keyword.as_deref().map(str::to_lowercase);
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|book| {
                keyword
                    .as_deref()
                    .map_or(true, |kw| book.title.to_lowercase().contains(kw))
                    && filter
                        .category
                        .as_deref()
                        .map_or(true, |category| book.category == category)
                    && filter.featured.map_or(true, |wanted| book.featured == wanted)
                    && filter
                        .bestseller
                        .map_or(true, |wanted| book.bestseller == wanted)
            })
            .cloned()
            .collect())
    }

    async fn save(&self, book: &Book) -> Result<Book, StoreError> {
        self.rows.lock().await.insert(book.id, book.clone());
        Ok(book.clone())
    }

    async fn update(&self, book: &Book) -> Result<Book, StoreError> {
        self.rows.lock().await.insert(book.id, book.clone());
        Ok(book.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.lock().await.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.lock().await.len() as i64)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUsers {
    rows: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUsers {
    pub(crate) async fn get(&self, id: Uuid) -> Option<User> {
        self.rows.lock().await.get(&id).cloned()
    }

    pub(crate) async fn put(&self, user: User) {
        self.rows.lock().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_reset_token(&self, token_hash: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|user| user.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        self.rows.lock().await.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        self.rows.lock().await.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.lock().await.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.lock().await.len() as i64)
    }

    async fn count_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|user| user.created_at >= start && user.created_at <= end)
            .count() as i64)
    }
}

/// Order store wired to a book store so `create` can mimic the real
/// transactional contract: every decrement is checked before any is
/// applied.
pub(crate) struct InMemoryOrders {
    rows: Mutex<HashMap<Uuid, Order>>,
    books: Arc<InMemoryBooks>,
}

impl InMemoryOrders {
    pub(crate) fn new(books: Arc<InMemoryBooks>) -> Self {
        Self {
            rows: Mutex::default(),
            books,
        }
    }

    pub(crate) async fn get(&self, id: Uuid) -> Option<Order> {
        self.rows.lock().await.get(&id).cloned()
    }

    pub(crate) async fn put(&self, order: Order) {
        self.rows.lock().await.insert(order.id, order);
    }

    pub(crate) async fn all(&self) -> Vec<Order> {
        self.rows.lock().await.values().cloned().collect()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn create(
        &self,
        order: &Order,
        decrements: &[StockDecrement],
    ) -> Result<Order, StoreError> {
        let mut books = self.books.rows.lock().await;
        for decrement in decrements {
            match books.get(&decrement.book_id) {
                Some(book) if book.stock >= decrement.qty => {}
                Some(_) => return Err(StoreError::InsufficientStock(decrement.title.clone())),
                None => return Err(StoreError::OrderItemNotFound(decrement.title.clone())),
            }
        }
        for decrement in decrements {
            if let Some(book) = books.get_mut(&decrement.book_id) {
                book.stock -= decrement.qty;
            }
        }
        self.rows.lock().await.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|order| order.created_at >= start && order.created_at <= end)
            .cloned()
            .collect())
    }

    async fn update(&self, order: &Order) -> Result<Order, StoreError> {
        self.rows.lock().await.insert(order.id, order.clone());
        Ok(order.clone())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryOffers {
    rows: Mutex<HashMap<Uuid, Offer>>,
}

impl InMemoryOffers {
    pub(crate) async fn insert(&self, offer: Offer) {
        self.rows.lock().await.insert(offer.id, offer);
    }
}

#[async_trait]
impl OfferRepository for InMemoryOffers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Offer>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|offer| offer.code == code)
            .cloned())
    }

    async fn save(&self, offer: &Offer) -> Result<Offer, StoreError> {
        self.rows.lock().await.insert(offer.id, offer.clone());
        Ok(offer.clone())
    }

    async fn find_all(&self) -> Result<Vec<Offer>, StoreError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.lock().await.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySubscribers {
    rows: Mutex<HashMap<Uuid, Subscriber>>,
}

#[async_trait]
impl SubscriberRepository for InMemorySubscribers {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|subscriber| subscriber.email == email)
            .cloned())
    }

    async fn save(&self, subscriber: &Subscriber) -> Result<Subscriber, StoreError> {
        self.rows
            .lock()
            .await
            .insert(subscriber.id, subscriber.clone());
        Ok(subscriber.clone())
    }

    async fn find_all(&self) -> Result<Vec<Subscriber>, StoreError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryMessages {
    rows: Mutex<HashMap<Uuid, Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessages {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, StoreError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn save(&self, message: &Message) -> Result<Message, StoreError> {
        self.rows.lock().await.insert(message.id, message.clone());
        Ok(message.clone())
    }

    async fn update(&self, message: &Message) -> Result<Message, StoreError> {
        self.rows.lock().await.insert(message.id, message.clone());
        Ok(message.clone())
    }

    async fn find_all(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.lock().await.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryCategories {
    rows: Mutex<HashMap<Uuid, Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, StoreError> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|category| category.name == name)
            .cloned())
    }

    async fn save(&self, category: &Category) -> Result<Category, StoreError> {
        self.rows.lock().await.insert(category.id, category.clone());
        Ok(category.clone())
    }

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.lock().await.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingMailer {
    outbox: Mutex<Vec<Email>>,
}

impl RecordingMailer {
    pub(crate) async fn sent(&self) -> Vec<Email> {
        self.outbox.lock().await.clone()
    }

    pub(crate) async fn clear(&self) {
        self.outbox.lock().await.clear();
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), StoreError> {
        self.outbox.lock().await.push(email);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeGateway;

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, StoreError> {
        Ok(GatewayOrder {
            id: format!("order_{receipt}"),
            amount,
            currency: currency.to_string(),
        })
    }
}

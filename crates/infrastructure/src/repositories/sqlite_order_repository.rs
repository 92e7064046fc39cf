use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    Order, OrderItem, OrderRepository, OrderStatus, PaymentResult, ShippingAddress, StockDecrement,
    StoreError,
};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct OrderModel {
    id: String,
    user_id: String,
    order_items: Json<Vec<OrderItem>>,
    shipping_address: Json<ShippingAddress>,
    payment_method: String,
    payment_result: Option<Json<PaymentResult>>,
    items_price: f64,
    tax_price: f64,
    shipping_price: f64,
    total_price: f64,
    status: String,
    is_paid: bool,
    is_delivered: bool,
    paid_at: Option<DateTime<Utc>>,
    delivered_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderModel> for Order {
    type Error = StoreError;

    fn try_from(model: OrderModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid order id: {}", e)))?;
        let user_id = Uuid::parse_str(&model.user_id)
            .map_err(|e| StoreError::RepositoryError(format!("invalid order user id: {}", e)))?;
        let status = OrderStatus::parse(&model.status).ok_or_else(|| {
            StoreError::RepositoryError(format!("unknown order status: {}", model.status))
        })?;
        Ok(Order {
            id,
            user_id,
            order_items: model.order_items.0,
            shipping_address: model.shipping_address.0,
            payment_method: model.payment_method,
            payment_result: model.payment_result.map(|json| json.0),
            items_price: model.items_price,
            tax_price: model.tax_price,
            shipping_price: model.shipping_price,
            total_price: model.total_price,
            status,
            is_paid: model.is_paid,
            is_delivered: model.is_delivered,
            paid_at: model.paid_at,
            delivered_at: model.delivered_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, sql: &str, bind: String) -> Result<Vec<Order>, StoreError> {
        let models = sqlx::query_as::<_, OrderModel>(sql)
            .bind(bind)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Order::try_from).collect()
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(
        &self,
        order: &Order,
        decrements: &[StockDecrement],
    ) -> Result<Order, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        // Guarded decrement per line: the WHERE clause refuses to take a
        // stock below zero, so a failed line aborts the transaction with
        // every prior decrement rolled back.
        for decrement in decrements {
            let result =
                sqlx::query("UPDATE books SET stock = stock - ? WHERE id = ? AND stock >= ?")
                    .bind(decrement.qty)
                    .bind(decrement.book_id.to_string())
                    .bind(decrement.qty)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

            if result.rows_affected() == 0 {
                let exists =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE id = ?")
                        .bind(decrement.book_id.to_string())
                        .fetch_one(&mut *tx)
                        .await
                        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
                return Err(if exists == 0 {
                    StoreError::OrderItemNotFound(decrement.title.clone())
                } else {
                    StoreError::InsufficientStock(decrement.title.clone())
                });
            }
        }

        sqlx::query(
            "INSERT INTO orders (id, user_id, order_items, shipping_address, payment_method, \
             payment_result, items_price, tax_price, shipping_price, total_price, status, \
             is_paid, is_delivered, paid_at, delivered_at, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id.to_string())
        .bind(order.user_id.to_string())
        .bind(Json(&order.order_items))
        .bind(Json(&order.shipping_address))
        .bind(&order.payment_method)
        .bind(order.payment_result.as_ref().map(Json))
        .bind(order.items_price)
        .bind(order.tax_price)
        .bind(order.shipping_price)
        .bind(order.total_price)
        .bind(order.status.as_str())
        .bind(order.is_paid)
        .bind(order.is_delivered)
        .bind(order.paid_at)
        .bind(order.delivered_at)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        Ok(order.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        let model = sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        model.map(Order::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, StoreError> {
        self.fetch_where(
            "SELECT * FROM orders WHERE user_id = ? ORDER BY created_at DESC",
            user_id.to_string(),
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Order>, StoreError> {
        let models =
            sqlx::query_as::<_, OrderModel>("SELECT * FROM orders ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Order::try_from).collect()
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Order>, StoreError> {
        let models = sqlx::query_as::<_, OrderModel>(
            "SELECT * FROM orders WHERE created_at >= ? AND created_at <= ? \
             ORDER BY created_at DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;
        models.into_iter().map(Order::try_from).collect()
    }

    async fn update(&self, order: &Order) -> Result<Order, StoreError> {
        let result = sqlx::query(
            "UPDATE orders SET order_items = ?, shipping_address = ?, payment_method = ?, \
             payment_result = ?, items_price = ?, tax_price = ?, shipping_price = ?, \
             total_price = ?, status = ?, is_paid = ?, is_delivered = ?, paid_at = ?, \
             delivered_at = ?, updated_at = ? WHERE id = ?",
        )
        .bind(Json(&order.order_items))
        .bind(Json(&order.shipping_address))
        .bind(&order.payment_method)
        .bind(order.payment_result.as_ref().map(Json))
        .bind(order.items_price)
        .bind(order.tax_price)
        .bind(order.shipping_price)
        .bind(order.total_price)
        .bind(order.status.as_str())
        .bind(order.is_paid)
        .bind(order.is_delivered)
        .bind(order.paid_at)
        .bind(order.delivered_at)
        .bind(order.updated_at)
        .bind(order.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::RepositoryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::OrderNotFound);
        }
        Ok(order.clone())
    }
}

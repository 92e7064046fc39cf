//! HTTP edge of the storefront. Routes map one-to-one onto the REST
//! surface the web client consumes.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

pub use state::AppState;

use handlers::{books, categories, chat, messages, newsletter, offers, orders, payments, users};

/// Builds the full route table. Middleware (CORS, request tracing) is
/// layered on by the binary so tests can serve the bare router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Catalog
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route(
            "/api/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/api/books/:id/reviews", post(books::create_review))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/api/categories/:id", delete(categories::delete_category))
        // Accounts
        .route("/api/users", post(users::register).get(users::list_users))
        .route("/api/users/login", post(users::login))
        .route(
            "/api/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route(
            "/api/users/wishlist",
            get(users::get_wishlist).post(users::add_to_wishlist),
        )
        .route("/api/users/wishlist/:id", delete(users::remove_from_wishlist))
        .route("/api/users/forgotpassword", post(users::forgot_password))
        .route("/api/users/resetpassword/:token", put(users::reset_password))
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Orders
        .route("/api/orders", post(orders::create_order).get(orders::list_orders))
        .route("/api/orders/myorders", get(orders::my_orders))
        .route("/api/orders/stats", get(orders::stats))
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/cancel", put(orders::cancel_order))
        .route("/api/orders/:id/status", put(orders::update_status))
        .route("/api/orders/:id/deliver", put(orders::deliver_order))
        // Payments
        .route("/api/payment/create-session", post(payments::create_session))
        .route("/api/payment/verify", post(payments::verify))
        // Newsletter, contact, offers, support chat
        .route("/api/newsletter/subscribe", post(newsletter::subscribe))
        .route("/api/newsletter/send", post(newsletter::send))
        .route(
            "/api/messages",
            post(messages::create_message).get(messages::list_messages),
        )
        .route("/api/messages/:id/read", put(messages::mark_read))
        .route("/api/messages/:id", delete(messages::delete_message))
        .route("/api/offers", get(offers::list_offers).post(offers::create_offer))
        .route("/api/offers/validate", post(offers::validate_offer))
        .route("/api/offers/:id", delete(offers::delete_offer))
        .route("/api/chat", post(chat::relay))
        .with_state(state)
}

async fn root() -> &'static str {
    "API is running..."
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

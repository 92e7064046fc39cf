use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use domain::{Book, BookFilter, BookUpdate};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AdminUser, CurrentUser};
use crate::error::ApiError;
use crate::state::AppState;

/// Catalog list filters. The storefront toggles a flag by sending any
/// non-empty value, so presence is what matters for `featured` and
/// `bestseller`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub featured: Option<String>,
    pub bestseller: Option<String>,
}

impl From<ListQuery> for BookFilter {
    fn from(query: ListQuery) -> Self {
        BookFilter {
            keyword: query.keyword.filter(|v| !v.is_empty()),
            category: query.category.filter(|v| !v.is_empty()),
            featured: flag(query.featured),
            bestseller: flag(query.bestseller),
        }
    }
}

fn flag(value: Option<String>) -> Option<bool> {
    value.filter(|v| !v.is_empty()).map(|_| true)
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let filter: BookFilter = query.into();
    let books = state.app.catalog_service.get_books(&filter).await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Book>, ApiError> {
    let book = state.app.catalog_service.get_book_by_id(id).await?;
    Ok(Json(book))
}

/// Creates a placeholder book the admin then edits in place.
pub async fn create_book(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state.app.catalog_service.create_book().await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(changes): Json<BookUpdate>,
) -> Result<Json<Book>, ApiError> {
    let book = state.app.catalog_service.update_book(id, changes).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.app.catalog_service.delete_book(id).await?;
    Ok(Json(json!({ "message": "Book removed" })))
}

pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(review): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state
        .app
        .catalog_service
        .add_review(id, user.id, user.name, review.rating, review.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": "Review added" }))))
}

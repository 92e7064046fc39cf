use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use domain::{Order, OrderDraft, OrderStatus, SalesStats, StoreError};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AdminUser, CurrentUser};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn create_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.app.order_service.create_order(&user, draft).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state.app.order_service.get_order(id, &user).await?;
    Ok(Json(order))
}

pub async fn my_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.app.order_service.my_orders(user.id).await?;
    Ok(Json(orders))
}

pub async fn list_orders(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.app.order_service.list_orders().await?;
    Ok(Json(orders))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state.app.order_service.cancel_order(id, &user).await?;
    Ok(Json(order))
}

pub async fn update_status(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let status = OrderStatus::parse(&request.status)
        .ok_or_else(|| StoreError::ValidationError("Invalid order status".to_string()))?;
    let order = state.app.order_service.update_status(id, status).await?;
    Ok(Json(order))
}

pub async fn deliver_order(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, ApiError> {
    let order = state.app.order_service.mark_delivered(id).await?;
    Ok(Json(order))
}

/// Dashboard aggregates. Both dates must be present to narrow the
/// window; a lone date is ignored like the storefront expects.
pub async fn stats(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Query(query): Query<StatsQuery>,
) -> Result<Json<SalesStats>, ApiError> {
    let range = parse_range(&query)?;
    let stats = state.app.order_service.stats(range).await?;
    Ok(Json(stats))
}

fn parse_range(query: &StatsQuery) -> Result<Option<(NaiveDate, NaiveDate)>, StoreError> {
    match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            Ok(Some((start, end)))
        }
        _ => Ok(None),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| StoreError::ValidationError(format!("Invalid date: {}", value)))
}

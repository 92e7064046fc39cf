use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use domain::Offer;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub code: String,
    pub discount_percentage: f64,
    pub expiration_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Checkout calls this with whatever the shopper typed.
pub async fn validate_offer(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<Offer>, ApiError> {
    let offer = state.app.offer_service.validate_code(&request.code).await?;
    Ok(Json(offer))
}

pub async fn list_offers(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<Offer>>, ApiError> {
    let offers = state.app.offer_service.list_offers().await?;
    Ok(Json(offers))
}

pub async fn create_offer(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(request): Json<CreateOfferRequest>,
) -> Result<(StatusCode, Json<Offer>), ApiError> {
    let offer = state
        .app
        .offer_service
        .create_offer(
            request.code,
            request.discount_percentage,
            request.expiration_date,
            request.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn delete_offer(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.app.offer_service.delete_offer(id).await?;
    Ok(Json(json!({ "message": "Offer removed" })))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let subscriber = state.app.newsletter_service.subscribe(request.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Successfully subscribed to newsletter",
            "data": subscriber,
        })),
    ))
}

pub async fn send(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<Value>, ApiError> {
    let count = state
        .app
        .newsletter_service
        .broadcast(&request.subject, &request.message)
        .await?;
    Ok(Json(json!({
        "message": format!("Newsletter sent to {} subscribers", count),
        "count": count,
    })))
}

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domain::Message;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

pub async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = state
        .app
        .message_service
        .create_message(request.name, request.email, request.subject, request.message)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn list_messages(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.app.message_service.list_messages().await?;
    Ok(Json(messages))
}

pub async fn mark_read(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, ApiError> {
    let message = state.app.message_service.mark_read(id).await?;
    Ok(Json(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.app.message_service.delete_message(id).await?;
    Ok(Json(json!({ "message": "Message removed" })))
}

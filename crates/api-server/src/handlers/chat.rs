use axum::extract::State;
use axum::Json;
use domain::StoreError;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub message: String,
}

/// Relays a support-chat message to the automation webhook and returns
/// its JSON reply untouched.
pub async fn relay(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.chat_id.is_empty() || request.message.is_empty() {
        return Err(
            StoreError::ValidationError("Please provide chatId and message".to_string()).into(),
        );
    }
    let reply = state
        .app
        .chat_forwarder
        .forward(&request.chat_id, user.id, &request.message)
        .await?;
    Ok(Json(reply))
}

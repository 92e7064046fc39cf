use axum::extract::State;
use axum::Json;
use domain::{PaymentSession, StoreError, VerifyRequest};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(rename = "orderId")]
    pub order_id: Uuid,
}

/// Opens a gateway checkout session for an order. The storefront shows
/// a gateway refusal here as a plain server failure, so the upstream
/// error is folded into a 500 while keeping its message.
pub async fn create_session(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Json(request): Json<CreateSessionRequest>,
) -> Result<Json<PaymentSession>, ApiError> {
    let session = state
        .app
        .payment_service
        .create_session(request.order_id)
        .await
        .map_err(|err| match err {
            StoreError::GatewayError(message) => StoreError::Internal(message),
            other => other,
        })?;
    Ok(Json(session))
}

pub async fn verify(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<Value>, ApiError> {
    state.app.payment_service.verify(request).await?;
    Ok(Json(json!({ "message": "Payment Verified", "verified": true })))
}

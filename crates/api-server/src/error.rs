use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::StoreError;
use serde_json::json;

/// Wraps [`StoreError`] so handlers can bail with `?` and still produce
/// the storefront's `{"message": ...}` error bodies.
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::ValidationError(_)
            | StoreError::InsufficientStock(_)
            | StoreError::InvalidStateTransition(_)
            | StoreError::InvalidSignature => StatusCode::BAD_REQUEST,
            StoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            StoreError::BookNotFound
            | StoreError::OrderItemNotFound(_)
            | StoreError::OrderNotFound
            | StoreError::UserNotFound
            | StoreError::OfferNotFound
            | StoreError::MessageNotFound
            | StoreError::CategoryNotFound => StatusCode::NOT_FOUND,
            StoreError::GatewayError(_) => StatusCode::BAD_GATEWAY,
            StoreError::RepositoryError(_) | StoreError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }

        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

//! Bearer-token extractors. Handlers take [`CurrentUser`] or
//! [`AdminUser`] as an argument and the route is protected.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use domain::{StoreError, User};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated account behind the request.
pub struct CurrentUser(pub User);

/// Like [`CurrentUser`], but only admits back-office accounts.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| StoreError::Unauthorized("Not authorized, no token".to_string()))?;
        let user = state.app.identity_service.authorize(token).await?;
        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(StoreError::Forbidden("Not authorized as an admin".to_string()).into());
        }
        Ok(AdminUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

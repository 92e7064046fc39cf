use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domain::{AdminUserUpdate, AuthenticatedUser, Book, ProfileUpdate, User};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{AdminUser, CurrentUser};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRequest {
    pub book_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthenticatedUser>), ApiError> {
    let account = state
        .app
        .identity_service
        .register(request.name, request.email, request.password)
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let account = state
        .app
        .identity_service
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(account))
}

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let profile = state.app.identity_service.profile(user.id).await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(changes): Json<ProfileUpdate>,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let profile = state
        .app
        .identity_service
        .update_profile(user.id, changes)
        .await?;
    Ok(Json(profile))
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.app.identity_service.wishlist(user.id).await?;
    Ok(Json(books))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<WishlistRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .app
        .identity_service
        .add_to_wishlist(user.id, request.book_id)
        .await?;
    Ok(Json(json!({ "message": "Book added to wishlist" })))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state
        .app
        .identity_service
        .remove_from_wishlist(user.id, book_id)
        .await?;
    Ok(Json(json!({ "message": "Book removed from wishlist" })))
}

/// Always replies success so the endpoint cannot be used to probe which
/// emails have accounts.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    state.app.identity_service.forgot_password(&request.email).await?;
    Ok(Json(json!({ "success": true, "data": "Email sent" })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let account = state
        .app
        .identity_service
        .reset_password(&token, &request.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": "Password Reset Success",
            "token": account.token,
        })),
    ))
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.app.identity_service.get_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = state.app.identity_service.get_user(id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
    Json(changes): Json<AdminUserUpdate>,
) -> Result<Json<User>, ApiError> {
    let user = state.app.identity_service.update_user(id, changes).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.app.identity_service.delete_user(id).await?;
    Ok(Json(json!({ "message": "User removed" })))
}

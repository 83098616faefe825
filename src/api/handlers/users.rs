use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::AppService;
use crate::api::models::{ApiError, ErrorResponse, UserResponse, UserUpdateRequest};

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Active users", body = [UserResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_users(State(service): State<AppService>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_user(
    State(service): State<AppService>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(service.get_user(user_id).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_user(
    State(service): State<AppService>,
    Path(user_id): Path<i64>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = service
        .update_user(user_id, req.name, req.email, req.home_currency)
        .await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/deactivate",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deactivated user", body = UserResponse),
        (status = 400, description = "Last active user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn deactivate_user(
    State(service): State<AppService>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(service.deactivate_user(user_id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/users/{user_id}/activate",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Activated user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Already active", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn activate_user(
    State(service): State<AppService>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(service.activate_user(user_id).await?.into()))
}

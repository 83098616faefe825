use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, ErrorResponse};
use crate::api::{AppService, CurrentUser};
use crate::core::models::{Account, AccountPatch, NewAccount};

#[utoipa::path(
    get,
    path = "/accounts",
    responses(
        (status = 200, description = "Active accounts", body = [Account]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_accounts(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Account>>, ApiError> {
    Ok(Json(service.list_accounts(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/accounts",
    request_body = NewAccount,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Name conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_account(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewAccount>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = service.create_account(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    get,
    path = "/accounts/{account_id}",
    params(("account_id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = Account),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_account(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(service.get_account(user.id, account_id).await?))
}

#[utoipa::path(
    patch,
    path = "/accounts/{account_id}",
    params(("account_id" = i64, Path, description = "Account id")),
    request_body = AccountPatch,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_account(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(account_id): Path<i64>,
    Json(req): Json<AccountPatch>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(service.update_account(user.id, account_id, req).await?))
}

#[utoipa::path(
    post,
    path = "/accounts/{account_id}/deactivate",
    params(("account_id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Deactivated account", body = Account),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 409, description = "Account referenced by transactions", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn deactivate_account(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(service.deactivate_account(user.id, account_id).await?))
}

#[utoipa::path(
    post,
    path = "/accounts/{account_id}/activate",
    params(("account_id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Activated account", body = Account),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 409, description = "Already active or conflicts", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn activate_account(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(service.activate_account(user.id, account_id).await?))
}

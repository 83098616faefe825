use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, ErrorResponse, SetSplitsRequest};
use crate::api::{AppService, CurrentUser};
use crate::core::models::{Split, SplitValidation};

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}/splits",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Active splits", body = [Split]),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_splits(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<Vec<Split>>, ApiError> {
    Ok(Json(service.get_splits(user.id, transaction_id).await?))
}

#[utoipa::path(
    put,
    path = "/transactions/{transaction_id}/splits",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    request_body = SetSplitsRequest,
    responses(
        (status = 200, description = "Replaced splits", body = [Split]),
        (status = 404, description = "Transaction or person not found", body = ErrorResponse),
        (status = 422, description = "Shares do not sum to the transaction amount", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn set_splits(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
    Json(req): Json<SetSplitsRequest>,
) -> Result<Json<Vec<Split>>, ApiError> {
    let splits = service
        .set_splits(user.id, transaction_id, req.payer_person_id, req.shares)
        .await?;
    Ok(Json(splits))
}

#[utoipa::path(
    delete,
    path = "/transactions/{transaction_id}/splits",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Splits cleared"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn clear_splits(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.clear_splits(user.id, transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}/splits/validation",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Reconciliation state", body = SplitValidation),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn validate_splits(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<SplitValidation>, ApiError> {
    Ok(Json(service.validate_splits(user.id, transaction_id).await?))
}

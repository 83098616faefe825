use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, ErrorResponse};
use crate::api::{AppService, CurrentUser};
use crate::core::models::{
    NewTransaction, Posting, Transaction, TransactionFilter, TransactionPatch,
};

#[utoipa::path(
    get,
    path = "/transactions",
    params(TransactionFilter),
    responses(
        (status = 200, description = "Transactions, newest first", body = [Transaction]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_transactions(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(service.list_transactions(user.id, filter).await?))
}

#[utoipa::path(
    post,
    path = "/transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Referenced entity not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_transaction(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let tx = service.create_transaction(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_transaction(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(service.get_transaction(user.id, transaction_id).await?))
}

#[utoipa::path(
    patch,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    request_body = TransactionPatch,
    responses(
        (status = 200, description = "Updated transaction", body = Transaction),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_transaction(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
    Json(req): Json<TransactionPatch>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(service.update_transaction(user.id, transaction_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Deactivated transaction", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn deactivate_transaction(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(service.deactivate_transaction(user.id, transaction_id).await?))
}

#[utoipa::path(
    post,
    path = "/transactions/{transaction_id}/activate",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Activated transaction", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 409, description = "Already active", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn activate_transaction(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(service.activate_transaction(user.id, transaction_id).await?))
}

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}/postings",
    params(("transaction_id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Derived ledger postings", body = [Posting]),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_postings(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<Vec<Posting>>, ApiError> {
    Ok(Json(
        service.get_transaction_postings(user.id, transaction_id).await?,
    ))
}

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::models::{ApiError, ErrorResponse};
use crate::api::{AppService, CurrentUser};
use crate::core::models::{AccountBalance, AppLog, BudgetProgressRow, PersonDebt};

#[utoipa::path(
    get,
    path = "/reports/balances",
    responses(
        (status = 200, description = "Per-account balances", body = [AccountBalance]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn balances(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<AccountBalance>>, ApiError> {
    Ok(Json(service.report_balances(user.id).await?))
}

#[utoipa::path(
    get,
    path = "/reports/debts",
    responses(
        (status = 200, description = "Per-person open debts", body = [PersonDebt]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn debts(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<PersonDebt>>, ApiError> {
    Ok(Json(service.report_debts(user.id).await?))
}

#[utoipa::path(
    get,
    path = "/reports/budget-progress/{year}/{month}",
    params(
        ("year" = i32, Path, description = "Year"),
        ("month" = u32, Path, description = "Month, 1..=12")
    ),
    responses(
        (status = 200, description = "Budgeted vs actual spending", body = [BudgetProgressRow]),
        (status = 400, description = "Invalid month", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn budget_progress(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<Vec<BudgetProgressRow>>, ApiError> {
    Ok(Json(service.report_budget_progress(user.id, year, month).await?))
}

#[utoipa::path(
    get,
    path = "/audit/logs",
    responses(
        (status = 200, description = "Application audit trail", body = [AppLog]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn audit_logs(
    State(service): State<AppService>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.audit_logs().await?))
}

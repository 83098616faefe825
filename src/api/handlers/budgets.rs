use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, ErrorResponse};
use crate::api::{AppService, CurrentUser};
use crate::core::models::{Budget, BudgetPatch, NewBudget};

#[utoipa::path(
    get,
    path = "/budgets",
    responses(
        (status = 200, description = "Budgets", body = [Budget]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_budgets(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    Ok(Json(service.list_budgets(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/budgets",
    request_body = NewBudget,
    responses(
        (status = 201, description = "Budget created", body = Budget),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Name and year conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_budget(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewBudget>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    let budget = service.create_budget(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

#[utoipa::path(
    get,
    path = "/budgets/{budget_id}",
    params(("budget_id" = i64, Path, description = "Budget id")),
    responses(
        (status = 200, description = "Budget with lines", body = Budget),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_budget(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(budget_id): Path<i64>,
) -> Result<Json<Budget>, ApiError> {
    Ok(Json(service.get_budget(user.id, budget_id).await?))
}

#[utoipa::path(
    get,
    path = "/budgets/{budget_id}/months/{month}",
    params(
        ("budget_id" = i64, Path, description = "Budget id"),
        ("month" = u32, Path, description = "Month, 1..=12")
    ),
    responses(
        (status = 200, description = "Budget restricted to one month", body = Budget),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_budget_month(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path((budget_id, month)): Path<(i64, u32)>,
) -> Result<Json<Budget>, ApiError> {
    Ok(Json(service.get_budget_month(user.id, budget_id, month).await?))
}

#[utoipa::path(
    patch,
    path = "/budgets/{budget_id}",
    params(("budget_id" = i64, Path, description = "Budget id")),
    request_body = BudgetPatch,
    responses(
        (status = 200, description = "Updated budget", body = Budget),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 409, description = "Name and year conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_budget(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(budget_id): Path<i64>,
    Json(req): Json<BudgetPatch>,
) -> Result<Json<Budget>, ApiError> {
    Ok(Json(service.update_budget(user.id, budget_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/budgets/{budget_id}",
    params(("budget_id" = i64, Path, description = "Budget id")),
    responses(
        (status = 204, description = "Budget deleted"),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_budget(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(budget_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete_budget(user.id, budget_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

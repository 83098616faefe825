use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, ErrorResponse, FxRateUpdateRequest};
use crate::api::{AppService, CurrentUser};
use crate::core::models::{FxRate, NewFxRate};

#[utoipa::path(
    get,
    path = "/fx-rates",
    responses(
        (status = 200, description = "Stored FX rates", body = [FxRate]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_fx_rates(
    State(service): State<AppService>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
) -> Result<Json<Vec<FxRate>>, ApiError> {
    Ok(Json(service.list_fx_rates().await?))
}

#[utoipa::path(
    post,
    path = "/fx-rates",
    request_body = NewFxRate,
    responses(
        (status = 201, description = "FX rate created", body = FxRate),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Rate already exists for the key", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_fx_rate(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<NewFxRate>,
) -> Result<(StatusCode, Json<FxRate>), ApiError> {
    let fx_rate = service.create_fx_rate(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(fx_rate)))
}

#[utoipa::path(
    get,
    path = "/fx-rates/{fx_rate_id}",
    params(("fx_rate_id" = i64, Path, description = "FX rate id")),
    responses(
        (status = 200, description = "FX rate", body = FxRate),
        (status = 404, description = "FX rate not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_fx_rate(
    State(service): State<AppService>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    Path(fx_rate_id): Path<i64>,
) -> Result<Json<FxRate>, ApiError> {
    Ok(Json(service.get_fx_rate(fx_rate_id).await?))
}

#[utoipa::path(
    patch,
    path = "/fx-rates/{fx_rate_id}",
    params(("fx_rate_id" = i64, Path, description = "FX rate id")),
    request_body = FxRateUpdateRequest,
    responses(
        (status = 200, description = "Updated FX rate", body = FxRate),
        (status = 400, description = "Invalid rate", body = ErrorResponse),
        (status = 404, description = "FX rate not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_fx_rate(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(fx_rate_id): Path<i64>,
    Json(req): Json<FxRateUpdateRequest>,
) -> Result<Json<FxRate>, ApiError> {
    Ok(Json(service.update_fx_rate(user.id, fx_rate_id, req.rate).await?))
}

#[utoipa::path(
    delete,
    path = "/fx-rates/{fx_rate_id}",
    params(("fx_rate_id" = i64, Path, description = "FX rate id")),
    responses(
        (status = 204, description = "FX rate deleted"),
        (status = 404, description = "FX rate not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_fx_rate(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(fx_rate_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete_fx_rate(user.id, fx_rate_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

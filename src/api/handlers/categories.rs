use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, CategoryCreateRequest, CategoryUpdateRequest, ErrorResponse};
use crate::api::{AppService, CurrentUser};
use crate::core::models::Category;

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Categories", body = [Category]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_categories(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(service.list_categories(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryCreateRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 409, description = "Name conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_category(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CategoryCreateRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = service.create_category(user.id, req.name, req.kind).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/categories/{category_id}",
    params(("category_id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_category(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(category_id): Path<i64>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(service.get_category(user.id, category_id).await?))
}

#[utoipa::path(
    patch,
    path = "/categories/{category_id}",
    params(("category_id" = i64, Path, description = "Category id")),
    request_body = CategoryUpdateRequest,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_category(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(category_id): Path<i64>,
    Json(req): Json<CategoryUpdateRequest>,
) -> Result<Json<Category>, ApiError> {
    let category = service
        .update_category(user.id, category_id, req.name, req.kind)
        .await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/categories/{category_id}",
    params(("category_id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category referenced", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_category(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(category_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete_category(user.id, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

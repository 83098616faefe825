use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::models::{ApiError, ErrorResponse, PersonCreateRequest, PersonUpdateRequest};
use crate::api::{AppService, CurrentUser};
use crate::core::models::Person;

#[utoipa::path(
    get,
    path = "/people",
    responses(
        (status = 200, description = "Active people", body = [Person]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn list_people(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(service.list_people(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/people",
    request_body = PersonCreateRequest,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 409, description = "Name or me-flag conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_person(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<PersonCreateRequest>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let person = service.create_person(user.id, req.name, req.is_me).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    get,
    path = "/people/{person_id}",
    params(("person_id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person", body = Person),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_person(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(person_id): Path<i64>,
) -> Result<Json<Person>, ApiError> {
    Ok(Json(service.get_person(user.id, person_id).await?))
}

#[utoipa::path(
    patch,
    path = "/people/{person_id}",
    params(("person_id" = i64, Path, description = "Person id")),
    request_body = PersonUpdateRequest,
    responses(
        (status = 200, description = "Updated person", body = Person),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 409, description = "Name or me-flag conflict", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_person(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(person_id): Path<i64>,
    Json(req): Json<PersonUpdateRequest>,
) -> Result<Json<Person>, ApiError> {
    let person = service
        .update_person(user.id, person_id, req.name, req.is_me)
        .await?;
    Ok(Json(person))
}

#[utoipa::path(
    post,
    path = "/people/{person_id}/deactivate",
    params(("person_id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Deactivated person", body = Person),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 409, description = "Person referenced by transactions", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn deactivate_person(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(person_id): Path<i64>,
) -> Result<Json<Person>, ApiError> {
    Ok(Json(service.deactivate_person(user.id, person_id).await?))
}

#[utoipa::path(
    post,
    path = "/people/{person_id}/activate",
    params(("person_id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Activated person", body = Person),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 409, description = "Already active or conflicts", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn activate_person(
    State(service): State<AppService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(person_id): Path<i64>,
) -> Result<Json<Person>, ApiError> {
    Ok(Json(service.activate_person(user.id, person_id).await?))
}

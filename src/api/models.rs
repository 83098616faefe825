use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::TrackerError;
use crate::core::models::{CategoryKind, ShareInput, User};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub home_currency: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

/// User representation without the password hash.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub home_currency: String,
    pub active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            home_currency: user.home_currency,
            active: user.active,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub home_currency: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct PersonCreateRequest {
    pub name: String,
    #[serde(default)]
    pub is_me: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct PersonUpdateRequest {
    pub name: Option<String>,
    pub is_me: Option<bool>,
}

#[derive(Deserialize, ToSchema)]
pub struct CategoryCreateRequest {
    pub name: String,
    pub kind: CategoryKind,
}

#[derive(Deserialize, ToSchema)]
pub struct CategoryUpdateRequest {
    pub name: Option<String>,
    pub kind: Option<CategoryKind>,
}

/// Split submission: the payer plus one share per participating person,
/// zero-amount entries included.
#[derive(Deserialize, ToSchema)]
pub struct SetSplitsRequest {
    pub payer_person_id: i64,
    pub shares: Vec<ShareInput>,
}

#[derive(Deserialize, ToSchema)]
pub struct FxRateUpdateRequest {
    pub rate: f64,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for TrackerError to implement IntoResponse
pub struct ApiError(pub TrackerError);

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            TrackerError::MissingEmail
            | TrackerError::InvalidEmail(_)
            | TrackerError::InvalidInput(_, _)
            | TrackerError::CategoryKindMismatch(_)
            | TrackerError::CurrencyMismatch { .. }
            | TrackerError::SameCurrencyForex
            | TrackerError::MissingCounterAccount
            | TrackerError::UnexpectedCounterField
            | TrackerError::DuplicateSplitPerson(_)
            | TrackerError::CannotDeactivateLastUser => StatusCode::BAD_REQUEST,

            TrackerError::InvalidCredentials | TrackerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            TrackerError::UserNotFound(_)
            | TrackerError::PersonNotFound(_)
            | TrackerError::AccountNotFound(_)
            | TrackerError::CategoryNotFound(_)
            | TrackerError::TransactionNotFound(_)
            | TrackerError::BudgetNotFound(_)
            | TrackerError::FxRateNotFound(_) => StatusCode::NOT_FOUND,

            TrackerError::EmailAlreadyRegistered(_)
            | TrackerError::PersonAlreadyExists(_)
            | TrackerError::MePersonAlreadyExists
            | TrackerError::AccountAlreadyExists(_)
            | TrackerError::CategoryAlreadyExists(_)
            | TrackerError::BudgetAlreadyExists(_, _)
            | TrackerError::FxRateAlreadyExists(_)
            | TrackerError::AlreadyActive(_)
            | TrackerError::PersonInUse(_)
            | TrackerError::AccountInUse(_)
            | TrackerError::CategoryInUse(_) => StatusCode::CONFLICT,

            TrackerError::SplitMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            TrackerError::StorageError(_)
            | TrackerError::LoggingError(_)
            | TrackerError::CacheError(_)
            | TrackerError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Someone who can owe a share of a transaction. At most one active person
/// per user carries `is_me = true`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Person {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub name: String,
    pub is_me: bool,
    pub active: bool,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub deleted_at: Option<DateTime<Utc>>,
}

use chrono::{DateTime, Utc};

/// Application owner account. Never serialized directly; the API layer maps
/// it to a response type without the password hash.
#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub home_currency: String,
    pub password_hash: String,
    pub active: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

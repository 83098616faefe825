use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Asset,
    Liability,
}

/// A money container: bank account, wallet, or a credit line. Billing and
/// due days are only meaningful for liabilities.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    pub opening_balance: f64,
    pub billing_day: Option<u32>,
    pub due_day: Option<u32>,
    pub active: bool,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    #[serde(default)]
    pub opening_balance: f64,
    pub billing_day: Option<u32>,
    pub due_day: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub kind: Option<AccountKind>,
    pub currency: Option<String>,
    pub opening_balance: Option<f64>,
    pub billing_day: Option<u32>,
    pub due_day: Option<u32>,
}

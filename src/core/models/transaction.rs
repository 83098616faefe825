use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
    Forex,
}

/// A single money movement. Income and expense transactions reference a
/// category and move `amount_total` on one account; transfer and forex
/// transactions move money between `account_id` and `counter_account_id`
/// and carry no category. The ledger view of a transaction is its postings.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    #[schema(value_type = String, example = "2024-01-15")]
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub description: Option<String>,
    pub amount_total: f64,
    pub currency: String,
    pub account_id: i64,
    pub counter_account_id: Option<i64>,
    pub counter_amount: Option<f64>,
    pub counter_currency: Option<String>,
    pub category_id: Option<i64>,
    pub payer_person_id: i64,
    pub active: bool,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub updated_at: DateTime<Utc>,
}

/// Ledger entry derived from a transaction: a signed amount against one
/// account, with the home-currency equivalent. Not editable through the API.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Posting {
    pub id: i64,
    pub transaction_id: i64,
    pub account_id: i64,
    pub amount: f64,
    pub currency: String,
    pub fx_rate: Option<f64>,
    pub amount_home: f64,
    pub active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewTransaction {
    #[schema(value_type = String, example = "2024-01-15")]
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub description: Option<String>,
    pub amount_total: f64,
    /// Defaults to the primary account's currency.
    pub currency: Option<String>,
    pub account_id: i64,
    pub counter_account_id: Option<i64>,
    pub counter_amount: Option<f64>,
    pub counter_currency: Option<String>,
    pub category_id: Option<i64>,
    pub payer_person_id: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TransactionPatch {
    #[schema(value_type = Option<String>, example = "2024-01-15")]
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub description: Option<String>,
    pub amount_total: Option<f64>,
    pub currency: Option<String>,
    pub account_id: Option<i64>,
    pub counter_account_id: Option<i64>,
    pub counter_amount: Option<f64>,
    pub counter_currency: Option<String>,
    pub category_id: Option<i64>,
    pub payer_person_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct TransactionFilter {
    #[param(value_type = Option<String>, example = "2024-01-01")]
    pub start_date: Option<NaiveDate>,
    #[param(value_type = Option<String>, example = "2024-12-31")]
    pub end_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
    pub payer_person_id: Option<i64>,
    /// Page size, 1..=200. Defaults to 50.
    pub limit: Option<usize>,
    /// Rows to skip. Defaults to 0.
    pub offset: Option<usize>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a share came to exist on a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SplitSource {
    /// Attributed to the owner by default.
    AutoDefault,
    /// Entered through the split editor.
    UserManual,
    /// Derived from a repayment income transaction.
    AutoDebtIncome,
}

/// Allocation of part of a transaction's amount to one person. The active
/// splits of a transaction always sum to its total within the tolerance;
/// the whole set is replaced on every submission.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Split {
    pub id: i64,
    pub transaction_id: i64,
    pub person_id: i64,
    pub amount: f64,
    pub source: SplitSource,
    pub active: bool,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShareInput {
    pub person_id: i64,
    pub amount: f64,
    pub source: Option<SplitSource>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct SplitValidation {
    pub amount_total: f64,
    pub share_sum: f64,
    pub remaining: f64,
    pub is_reconciled: bool,
}

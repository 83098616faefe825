use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::account::AccountKind;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountBalance {
    pub account_id: i64,
    pub account_name: String,
    pub kind: AccountKind,
    pub currency: String,
    pub balance: f64,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PersonDebt {
    pub person_id: i64,
    pub person_name: String,
    pub debt: f64,
    /// False once the person's debt is settled within the cent tolerance.
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct BudgetProgressRow {
    pub budget_id: i64,
    pub budget_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub month: u32,
    pub budgeted: f64,
    pub actual: f64,
    /// `actual / budgeted`, or 0.0 when nothing was budgeted.
    pub progress: f64,
}

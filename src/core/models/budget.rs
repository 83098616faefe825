use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BudgetLine {
    pub id: i64,
    pub month: u32,
    pub category_id: i64,
    pub amount: f64,
    pub description: Option<String>,
}

/// Yearly budget header with per-month, per-category lines. Lines are
/// replaced wholesale on update.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub name: String,
    pub year: i32,
    pub lines: Vec<BudgetLine>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewBudgetLine {
    pub month: u32,
    pub category_id: i64,
    pub amount: f64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewBudget {
    pub name: String,
    pub year: i32,
    pub lines: Vec<NewBudgetLine>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub lines: Option<Vec<NewBudgetLine>>,
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Income,
    Expense,
}

/// Transaction classification. Hard-deleted; deletion is rejected while any
/// active transaction or budget line references the category.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub name: String,
    pub kind: CategoryKind,
}

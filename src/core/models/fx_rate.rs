use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Monthly conversion rate between two currencies, keyed by
/// (from, to, year, month).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FxRate {
    pub id: i64,
    pub from_currency: String,
    pub to_currency: String,
    pub year: i32,
    pub month: u32,
    pub rate: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewFxRate {
    pub from_currency: String,
    pub to_currency: String,
    pub year: i32,
    pub month: u32,
    pub rate: f64,
}

pub mod accounts;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod fx_rates;
pub mod people;
pub mod reports;
pub mod splits;
pub mod transactions;
pub mod users;

pub async fn health() -> &'static str {
    "OK"
}

pub mod handlers;
pub mod models;
pub mod openapi;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use http::header;

use crate::api::models::ApiError;
use crate::core::errors::TrackerError;
use crate::core::models::User;
use crate::core::service::FinanceService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type AppService = Arc<FinanceService<InMemoryLogging, InMemoryStorage, InMemoryCache>>;

/// Authenticated user, resolved from the bearer token by the middleware.
#[derive(Clone)]
pub struct CurrentUser(pub User);

async fn auth_middleware(
    State(service): State<AppService>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| TrackerError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| TrackerError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    let user = service
        .get_user(claims.user_id()?)
        .await
        .map_err(|_| TrackerError::Unauthorized("Unknown user".to_string()))?;
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: AppService) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(handlers::users::list_users))
        .route(
            "/users/{user_id}",
            get(handlers::users::get_user).patch(handlers::users::update_user),
        )
        .route("/users/{user_id}/deactivate", post(handlers::users::deactivate_user))
        .route("/users/{user_id}/activate", post(handlers::users::activate_user))
        .route(
            "/people",
            get(handlers::people::list_people).post(handlers::people::create_person),
        )
        .route(
            "/people/{person_id}",
            get(handlers::people::get_person).patch(handlers::people::update_person),
        )
        .route(
            "/people/{person_id}/deactivate",
            post(handlers::people::deactivate_person),
        )
        .route(
            "/people/{person_id}/activate",
            post(handlers::people::activate_person),
        )
        .route(
            "/accounts",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route(
            "/accounts/{account_id}",
            get(handlers::accounts::get_account).patch(handlers::accounts::update_account),
        )
        .route(
            "/accounts/{account_id}/deactivate",
            post(handlers::accounts::deactivate_account),
        )
        .route(
            "/accounts/{account_id}/activate",
            post(handlers::accounts::activate_account),
        )
        .route(
            "/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route(
            "/categories/{category_id}",
            get(handlers::categories::get_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/{transaction_id}",
            get(handlers::transactions::get_transaction)
                .patch(handlers::transactions::update_transaction)
                .delete(handlers::transactions::deactivate_transaction),
        )
        .route(
            "/transactions/{transaction_id}/activate",
            post(handlers::transactions::activate_transaction),
        )
        .route(
            "/transactions/{transaction_id}/postings",
            get(handlers::transactions::get_postings),
        )
        .route(
            "/transactions/{transaction_id}/splits",
            get(handlers::splits::get_splits)
                .put(handlers::splits::set_splits)
                .delete(handlers::splits::clear_splits),
        )
        .route(
            "/transactions/{transaction_id}/splits/validation",
            get(handlers::splits::validate_splits),
        )
        .route(
            "/budgets",
            get(handlers::budgets::list_budgets).post(handlers::budgets::create_budget),
        )
        .route(
            "/budgets/{budget_id}",
            get(handlers::budgets::get_budget)
                .patch(handlers::budgets::update_budget)
                .delete(handlers::budgets::delete_budget),
        )
        .route(
            "/budgets/{budget_id}/months/{month}",
            get(handlers::budgets::get_budget_month),
        )
        .route(
            "/fx-rates",
            get(handlers::fx_rates::list_fx_rates).post(handlers::fx_rates::create_fx_rate),
        )
        .route(
            "/fx-rates/{fx_rate_id}",
            get(handlers::fx_rates::get_fx_rate)
                .patch(handlers::fx_rates::update_fx_rate)
                .delete(handlers::fx_rates::delete_fx_rate),
        )
        .route("/reports/balances", get(handlers::reports::balances))
        .route("/reports/debts", get(handlers::reports::debts))
        .route(
            "/reports/budget-progress/{year}/{month}",
            get(handlers::reports::budget_progress),
        )
        .route("/audit/logs", get(handlers::reports::audit_logs))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/", get(handlers::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .merge(protected_routes)
        .with_state(service)
}

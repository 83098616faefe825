use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::models::{
    CategoryCreateRequest, CategoryUpdateRequest, ErrorResponse, FxRateUpdateRequest, LoginRequest,
    LoginResponse, PersonCreateRequest, PersonUpdateRequest, RegisterRequest, SetSplitsRequest,
    UserResponse, UserUpdateRequest,
};
use crate::core::models::{
    Account, AccountBalance, AccountKind, AccountPatch, AppLog, Budget, BudgetLine, BudgetPatch,
    BudgetProgressRow, Category, CategoryKind, FxRate, NewAccount, NewBudget, NewBudgetLine,
    NewFxRate, NewTransaction, Person, PersonDebt, Posting, ShareInput, Split, SplitSource,
    SplitValidation, Transaction, TransactionKind, TransactionPatch,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::auth::register,
        super::handlers::auth::login,
        super::handlers::users::list_users,
        super::handlers::users::get_user,
        super::handlers::users::update_user,
        super::handlers::users::deactivate_user,
        super::handlers::users::activate_user,
        super::handlers::people::list_people,
        super::handlers::people::create_person,
        super::handlers::people::get_person,
        super::handlers::people::update_person,
        super::handlers::people::deactivate_person,
        super::handlers::people::activate_person,
        super::handlers::accounts::list_accounts,
        super::handlers::accounts::create_account,
        super::handlers::accounts::get_account,
        super::handlers::accounts::update_account,
        super::handlers::accounts::deactivate_account,
        super::handlers::accounts::activate_account,
        super::handlers::categories::list_categories,
        super::handlers::categories::create_category,
        super::handlers::categories::get_category,
        super::handlers::categories::update_category,
        super::handlers::categories::delete_category,
        super::handlers::transactions::list_transactions,
        super::handlers::transactions::create_transaction,
        super::handlers::transactions::get_transaction,
        super::handlers::transactions::update_transaction,
        super::handlers::transactions::deactivate_transaction,
        super::handlers::transactions::activate_transaction,
        super::handlers::transactions::get_postings,
        super::handlers::splits::get_splits,
        super::handlers::splits::set_splits,
        super::handlers::splits::clear_splits,
        super::handlers::splits::validate_splits,
        super::handlers::budgets::list_budgets,
        super::handlers::budgets::create_budget,
        super::handlers::budgets::get_budget,
        super::handlers::budgets::get_budget_month,
        super::handlers::budgets::update_budget,
        super::handlers::budgets::delete_budget,
        super::handlers::fx_rates::list_fx_rates,
        super::handlers::fx_rates::create_fx_rate,
        super::handlers::fx_rates::get_fx_rate,
        super::handlers::fx_rates::update_fx_rate,
        super::handlers::fx_rates::delete_fx_rate,
        super::handlers::reports::balances,
        super::handlers::reports::debts,
        super::handlers::reports::budget_progress,
        super::handlers::reports::audit_logs
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        UserResponse,
        UserUpdateRequest,
        PersonCreateRequest,
        PersonUpdateRequest,
        CategoryCreateRequest,
        CategoryUpdateRequest,
        SetSplitsRequest,
        FxRateUpdateRequest,
        ErrorResponse,
        Person,
        Account,
        AccountKind,
        NewAccount,
        AccountPatch,
        Category,
        CategoryKind,
        Transaction,
        TransactionKind,
        NewTransaction,
        TransactionPatch,
        Posting,
        Split,
        SplitSource,
        ShareInput,
        SplitValidation,
        Budget,
        BudgetLine,
        NewBudget,
        NewBudgetLine,
        BudgetPatch,
        FxRate,
        NewFxRate,
        AccountBalance,
        PersonDebt,
        BudgetProgressRow,
        AppLog
    )),
    modifiers(&SecurityAddon),
    info(
        title = "Fintrack API",
        description = "API for managing personal finance data",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

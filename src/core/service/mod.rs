mod accounts;
mod budgets;
mod categories;
mod fx_rates;
mod people;
mod reports;
mod splits;
mod transactions;
mod users;

use crate::auth::jwt::{Claims, JwtService};
use crate::constants::MAX_NAME_LENGTH;
use crate::core::errors::{FieldError, TrackerError};
use crate::core::models::{Account, Category, Person, Transaction, User};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

/// All business rules live here; handlers stay thin. Generic over the
/// storage, audit logging, and cache boundaries.
pub struct FinanceService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    jwt_service: JwtService,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn has_cent_precision(amount: f64) -> bool {
    ((amount * 100.0).round() - amount * 100.0).abs() < 1e-6
}

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, jwt_secret: String) -> Self {
        FinanceService {
            storage,
            logging,
            cache,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, TrackerError> {
        self.jwt_service.validate_token(token)
    }

    pub(crate) async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<i64>,
    ) -> Result<(), TrackerError> {
        self.logging.log_action(action, details, user_id).await
    }

    fn invalid_input(field: &str, title: &str, description: String) -> TrackerError {
        TrackerError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description,
            },
        )
    }

    pub(crate) fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
    ) -> Result<(), TrackerError> {
        if value.trim().is_empty() {
            return Err(Self::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.len() > max_length {
            return Err(Self::invalid_input(
                field,
                &format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(Self::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    /// Strictly positive monetary amount with cent precision.
    pub(crate) fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), TrackerError> {
        if !amount.is_finite() {
            return Err(Self::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number".to_string(),
            ));
        }
        if amount <= 0.0 {
            return Err(Self::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0".to_string(),
            ));
        }
        if amount > crate::constants::MAX_AMOUNT {
            return Err(Self::invalid_input(
                field,
                "Amount Too Large",
                "Amount cannot exceed 1,000,000".to_string(),
            ));
        }
        if !has_cent_precision(amount) {
            return Err(Self::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot have more than 2 decimal places".to_string(),
            ));
        }
        Ok(())
    }

    /// Share and opening-balance variant: zero is allowed.
    pub(crate) fn validate_non_negative_amount(
        &self,
        field: &str,
        amount: f64,
    ) -> Result<(), TrackerError> {
        if !amount.is_finite() {
            return Err(Self::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number".to_string(),
            ));
        }
        if amount < 0.0 {
            return Err(Self::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot be negative".to_string(),
            ));
        }
        if amount > crate::constants::MAX_AMOUNT {
            return Err(Self::invalid_input(
                field,
                "Amount Too Large",
                "Amount cannot exceed 1,000,000".to_string(),
            ));
        }
        if !has_cent_precision(amount) {
            return Err(Self::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot have more than 2 decimal places".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn validate_currency_code(
        &self,
        field: &str,
        value: &str,
    ) -> Result<String, TrackerError> {
        let code = value.to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Self::invalid_input(
                field,
                "Invalid Currency",
                "Currency must be a 3-letter code".to_string(),
            ));
        }
        Ok(code)
    }

    pub(crate) fn validate_month(&self, field: &str, month: u32) -> Result<(), TrackerError> {
        if !(1..=12).contains(&month) {
            return Err(Self::invalid_input(
                field,
                "Invalid Month",
                "Month must be between 1 and 12".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn validate_name(&self, value: &str) -> Result<(), TrackerError> {
        self.validate_string_input("name", value, MAX_NAME_LENGTH)
    }

    // Ownership-scoped lookups. Inactive records read as absent.

    pub(crate) async fn active_user(&self, user_id: i64) -> Result<User, TrackerError> {
        self.storage
            .get_user(user_id)
            .await?
            .filter(|u| u.active)
            .ok_or(TrackerError::UserNotFound(user_id))
    }

    pub(crate) async fn active_person(
        &self,
        user_id: i64,
        person_id: i64,
    ) -> Result<Person, TrackerError> {
        self.storage
            .get_person(person_id)
            .await?
            .filter(|p| p.user_id == user_id && p.active)
            .ok_or(TrackerError::PersonNotFound(person_id))
    }

    pub(crate) async fn active_account(
        &self,
        user_id: i64,
        account_id: i64,
    ) -> Result<Account, TrackerError> {
        self.storage
            .get_account(account_id)
            .await?
            .filter(|a| a.user_id == user_id && a.active)
            .ok_or(TrackerError::AccountNotFound(account_id))
    }

    pub(crate) async fn owned_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Category, TrackerError> {
        self.storage
            .get_category(category_id)
            .await?
            .filter(|c| c.user_id == user_id)
            .ok_or(TrackerError::CategoryNotFound(category_id))
    }

    pub(crate) async fn active_transaction(
        &self,
        user_id: i64,
        tx_id: i64,
    ) -> Result<Transaction, TrackerError> {
        self.storage
            .get_transaction(tx_id)
            .await?
            .filter(|t| t.user_id == user_id && t.active)
            .ok_or(TrackerError::TransactionNotFound(tx_id))
    }
}

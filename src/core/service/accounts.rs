use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::constants::{ACCOUNT_ACTIVATED, ACCOUNT_CREATED, ACCOUNT_DEACTIVATED, ACCOUNT_UPDATED};
use crate::core::errors::TrackerError;
use crate::core::models::{Account, AccountKind, AccountPatch, NewAccount};
use crate::core::service::FinanceService;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>, TrackerError> {
        Ok(self
            .storage
            .list_accounts(user_id)
            .await?
            .into_iter()
            .filter(|a| a.active)
            .collect())
    }

    pub async fn create_account(
        &self,
        user_id: i64,
        input: NewAccount,
    ) -> Result<Account, TrackerError> {
        info!("Creating account '{}' for user {}", input.name, user_id);
        self.active_user(user_id).await?;
        self.validate_name(&input.name)?;
        let currency = self.validate_currency_code("currency", &input.currency)?;
        self.validate_non_negative_amount("opening_balance", input.opening_balance)?;
        Self::validate_account_shape(input.kind, input.billing_day, input.due_day)?;
        self.validate_unique_account(user_id, &input.name, input.kind, None)
            .await?;

        let account = self
            .storage
            .create_account(Account {
                id: 0,
                user_id,
                name: input.name,
                kind: input.kind,
                currency,
                opening_balance: input.opening_balance,
                billing_day: input.billing_day,
                due_day: input.due_day,
                active: true,
                deleted_at: None,
            })
            .await?;

        self.cache.invalidate_balances(user_id).await?;
        self.log_action(
            ACCOUNT_CREATED,
            json!({ "account_id": account.id, "name": account.name }),
            Some(user_id),
        )
        .await?;
        Ok(account)
    }

    pub async fn get_account(&self, user_id: i64, account_id: i64) -> Result<Account, TrackerError> {
        self.active_account(user_id, account_id).await
    }

    pub async fn update_account(
        &self,
        user_id: i64,
        account_id: i64,
        patch: AccountPatch,
    ) -> Result<Account, TrackerError> {
        let mut account = self.active_account(user_id, account_id).await?;

        if let Some(name) = patch.name {
            self.validate_name(&name)?;
            account.name = name;
        }
        if let Some(kind) = patch.kind {
            account.kind = kind;
            if kind == AccountKind::Asset {
                account.billing_day = None;
                account.due_day = None;
            }
        }
        if let Some(currency) = patch.currency {
            account.currency = self.validate_currency_code("currency", &currency)?;
        }
        if let Some(balance) = patch.opening_balance {
            self.validate_non_negative_amount("opening_balance", balance)?;
            account.opening_balance = balance;
        }
        if patch.billing_day.is_some() {
            account.billing_day = patch.billing_day;
        }
        if patch.due_day.is_some() {
            account.due_day = patch.due_day;
        }

        Self::validate_account_shape(account.kind, account.billing_day, account.due_day)?;
        self.validate_unique_account(user_id, &account.name, account.kind, Some(account_id))
            .await?;

        let updated = self.storage.update_account(account).await?;
        self.cache.invalidate_balances(user_id).await?;
        self.log_action(ACCOUNT_UPDATED, json!({ "account_id": account_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn deactivate_account(
        &self,
        user_id: i64,
        account_id: i64,
    ) -> Result<Account, TrackerError> {
        let mut account = self.active_account(user_id, account_id).await?;

        let in_use = self
            .storage
            .list_transactions(user_id)
            .await?
            .iter()
            .any(|t| {
                t.active && (t.account_id == account_id || t.counter_account_id == Some(account_id))
            });
        if in_use {
            warn!("Account {} still referenced by transactions", account_id);
            return Err(TrackerError::AccountInUse(account_id));
        }

        account.active = false;
        account.deleted_at = Some(Utc::now());
        let updated = self.storage.update_account(account).await?;

        self.cache.invalidate_balances(user_id).await?;
        self.log_action(
            ACCOUNT_DEACTIVATED,
            json!({ "account_id": account_id }),
            Some(user_id),
        )
        .await?;
        Ok(updated)
    }

    pub async fn activate_account(
        &self,
        user_id: i64,
        account_id: i64,
    ) -> Result<Account, TrackerError> {
        let mut account = self
            .storage
            .get_account(account_id)
            .await?
            .filter(|a| a.user_id == user_id)
            .ok_or(TrackerError::AccountNotFound(account_id))?;
        if account.active {
            return Err(TrackerError::AlreadyActive("Account".to_string()));
        }

        self.validate_unique_account(user_id, &account.name, account.kind, Some(account_id))
            .await?;

        account.active = true;
        account.deleted_at = None;
        let updated = self.storage.update_account(account).await?;

        self.cache.invalidate_balances(user_id).await?;
        self.log_action(ACCOUNT_ACTIVATED, json!({ "account_id": account_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    fn validate_account_shape(
        kind: AccountKind,
        billing_day: Option<u32>,
        due_day: Option<u32>,
    ) -> Result<(), TrackerError> {
        if kind == AccountKind::Asset && (billing_day.is_some() || due_day.is_some()) {
            return Err(Self::invalid_input(
                "billing_day",
                "Invalid Account",
                "Billing and due days are only valid for liability accounts".to_string(),
            ));
        }
        for (field, day) in [("billing_day", billing_day), ("due_day", due_day)] {
            if let Some(day) = day
                && !(1..=31).contains(&day)
            {
                return Err(Self::invalid_input(
                    field,
                    "Invalid Day",
                    format!("{} must be between 1 and 31", field),
                ));
            }
        }
        Ok(())
    }

    async fn validate_unique_account(
        &self,
        user_id: i64,
        name: &str,
        kind: AccountKind,
        exclude_id: Option<i64>,
    ) -> Result<(), TrackerError> {
        let duplicate = self
            .storage
            .list_accounts(user_id)
            .await?
            .iter()
            .any(|a| a.active && a.name == name && a.kind == kind && Some(a.id) != exclude_id);
        if duplicate {
            return Err(TrackerError::AccountAlreadyExists(name.to_string()));
        }
        Ok(())
    }
}

use chrono::{Datelike, NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::constants::{
    MAX_DESCRIPTION_LENGTH, SPLITS_CLEARED, TRANSACTION_ACTIVATED, TRANSACTION_CREATED,
    TRANSACTION_DEACTIVATED, TRANSACTION_UPDATED,
};
use crate::core::errors::TrackerError;
use crate::core::models::{
    Account, CategoryKind, NewTransaction, Posting, Transaction, TransactionFilter, TransactionKind,
    TransactionPatch,
};
use crate::core::service::{FinanceService, round2};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn create_transaction(
        &self,
        user_id: i64,
        input: NewTransaction,
    ) -> Result<Transaction, TrackerError> {
        info!(
            "Creating {:?} transaction of {} for user {}",
            input.kind, input.amount_total, user_id
        );
        let user = self.active_user(user_id).await?;
        let account = self.active_account(user_id, input.account_id).await?;
        self.active_person(user_id, input.payer_person_id).await?;
        self.validate_amount_input("amount_total", input.amount_total)?;
        if let Some(ref description) = input.description {
            self.validate_string_input("description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        let currency = match input.currency {
            Some(code) => self.validate_currency_code("currency", &code)?,
            None => account.currency.clone(),
        };
        let counter_currency = input
            .counter_currency
            .map(|c| self.validate_currency_code("counter_currency", &c))
            .transpose()?;

        let now = Utc::now();
        let tx = Transaction {
            id: 0,
            user_id,
            date: input.date,
            kind: input.kind,
            description: input.description,
            amount_total: input.amount_total,
            currency,
            account_id: input.account_id,
            counter_account_id: input.counter_account_id,
            counter_amount: input.counter_amount,
            counter_currency,
            category_id: input.category_id,
            payer_person_id: input.payer_person_id,
            active: true,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        let counter = self.resolve_counter_account(user_id, &tx).await?;
        self.validate_transaction_shape(user_id, &tx, &account, counter.as_ref())
            .await?;

        let tx = self.storage.create_transaction(tx).await?;
        let postings = self.build_postings(&tx, &user.home_currency).await?;
        self.storage.replace_postings(tx.id, postings).await?;
        self.cache.invalidate_balances(user_id).await?;

        self.log_action(
            TRANSACTION_CREATED,
            json!({
                "transaction_id": tx.id,
                "kind": tx.kind,
                "amount_total": tx.amount_total,
                "account_id": tx.account_id
            }),
            Some(user_id),
        )
        .await?;

        Ok(tx)
    }

    pub async fn get_transaction(&self, user_id: i64, tx_id: i64) -> Result<Transaction, TrackerError> {
        self.active_transaction(user_id, tx_id).await
    }

    pub async fn list_transactions(
        &self,
        user_id: i64,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, TrackerError> {
        let limit = filter.limit.unwrap_or(50).clamp(1, 200);
        let offset = filter.offset.unwrap_or(0);

        let mut transactions: Vec<Transaction> = self
            .storage
            .list_transactions(user_id)
            .await?
            .into_iter()
            .filter(|t| t.active)
            .filter(|t| filter.start_date.is_none_or(|d| t.date >= d))
            .filter(|t| filter.end_date.is_none_or(|d| t.date <= d))
            .filter(|t| filter.account_id.is_none_or(|id| t.account_id == id))
            .filter(|t| filter.category_id.is_none_or(|id| t.category_id == Some(id)))
            .filter(|t| filter.payer_person_id.is_none_or(|id| t.payer_person_id == id))
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(transactions.into_iter().skip(offset).take(limit).collect())
    }

    pub async fn update_transaction(
        &self,
        user_id: i64,
        tx_id: i64,
        patch: TransactionPatch,
    ) -> Result<Transaction, TrackerError> {
        let tx = self.active_transaction(user_id, tx_id).await?;
        let user = self.active_user(user_id).await?;

        let mut merged = tx.clone();
        if let Some(kind) = patch.kind
            && kind != merged.kind
        {
            // Kind-specific fields do not carry over between shapes.
            merged.kind = kind;
            merged.counter_account_id = None;
            merged.counter_amount = None;
            merged.counter_currency = None;
            merged.category_id = None;
        }
        if let Some(date) = patch.date {
            merged.date = date;
        }
        if let Some(description) = patch.description {
            self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
            merged.description = Some(description);
        }
        if let Some(amount) = patch.amount_total {
            self.validate_amount_input("amount_total", amount)?;
            merged.amount_total = amount;
        }
        let currency_patched = patch.currency.is_some();
        if let Some(currency) = patch.currency {
            merged.currency = self.validate_currency_code("currency", &currency)?;
        }
        if let Some(account_id) = patch.account_id {
            merged.account_id = account_id;
        }
        if patch.counter_account_id.is_some() {
            merged.counter_account_id = patch.counter_account_id;
        }
        if patch.counter_amount.is_some() {
            merged.counter_amount = patch.counter_amount;
        }
        if patch.counter_currency.is_some() {
            merged.counter_currency = patch
                .counter_currency
                .map(|c| self.validate_currency_code("counter_currency", &c))
                .transpose()?;
        }
        if patch.category_id.is_some() {
            merged.category_id = patch.category_id;
        }
        if let Some(payer_person_id) = patch.payer_person_id {
            self.active_person(user_id, payer_person_id).await?;
            merged.payer_person_id = payer_person_id;
        }

        let account = self.active_account(user_id, merged.account_id).await?;
        if !currency_patched && merged.account_id != tx.account_id {
            merged.currency = account.currency.clone();
        }
        let counter = self.resolve_counter_account(user_id, &merged).await?;
        self.validate_transaction_shape(user_id, &merged, &account, counter.as_ref())
            .await?;

        let amount_changed = merged.amount_total != tx.amount_total;
        let monetary_changed = amount_changed
            || merged.kind != tx.kind
            || merged.date != tx.date
            || merged.currency != tx.currency
            || merged.account_id != tx.account_id
            || merged.counter_account_id != tx.counter_account_id
            || merged.counter_amount != tx.counter_amount
            || merged.counter_currency != tx.counter_currency;

        merged.updated_at = Utc::now();
        let updated = self.storage.update_transaction(merged).await?;

        if monetary_changed {
            debug!("Rebuilding postings for transaction {}", tx_id);
            let postings = self.build_postings(&updated, &user.home_currency).await?;
            self.storage.replace_postings(tx_id, postings).await?;
            self.cache.invalidate_balances(user_id).await?;
        }

        // A changed total invalidates the reconciled share set; drop it
        // rather than leave splits that no longer sum to the transaction.
        if amount_changed {
            let had_splits = self
                .storage
                .get_splits(tx_id)
                .await?
                .iter()
                .any(|s| s.active);
            if had_splits {
                self.storage.replace_splits(tx_id, Vec::new()).await?;
                self.log_action(
                    SPLITS_CLEARED,
                    json!({ "transaction_id": tx_id, "reason": "amount_changed" }),
                    Some(user_id),
                )
                .await?;
            }
        }

        self.log_action(
            TRANSACTION_UPDATED,
            json!({ "transaction_id": tx_id }),
            Some(user_id),
        )
        .await?;
        Ok(updated)
    }

    pub async fn deactivate_transaction(
        &self,
        user_id: i64,
        tx_id: i64,
    ) -> Result<Transaction, TrackerError> {
        let mut tx = self.active_transaction(user_id, tx_id).await?;

        let now = Utc::now();
        tx.active = false;
        tx.deleted_at = Some(now);
        tx.updated_at = now;
        let updated = self.storage.update_transaction(tx).await?;
        self.storage.set_postings_active(tx_id, false).await?;
        self.cache.invalidate_balances(user_id).await?;

        self.log_action(
            TRANSACTION_DEACTIVATED,
            json!({ "transaction_id": tx_id }),
            Some(user_id),
        )
        .await?;
        Ok(updated)
    }

    pub async fn activate_transaction(
        &self,
        user_id: i64,
        tx_id: i64,
    ) -> Result<Transaction, TrackerError> {
        let mut tx = self
            .storage
            .get_transaction(tx_id)
            .await?
            .filter(|t| t.user_id == user_id)
            .ok_or(TrackerError::TransactionNotFound(tx_id))?;
        if tx.active {
            return Err(TrackerError::AlreadyActive("Transaction".to_string()));
        }

        tx.active = true;
        tx.deleted_at = None;
        tx.updated_at = Utc::now();
        let updated = self.storage.update_transaction(tx).await?;
        self.storage.set_postings_active(tx_id, true).await?;
        self.cache.invalidate_balances(user_id).await?;

        self.log_action(
            TRANSACTION_ACTIVATED,
            json!({ "transaction_id": tx_id }),
            Some(user_id),
        )
        .await?;
        Ok(updated)
    }

    pub async fn get_transaction_postings(
        &self,
        user_id: i64,
        tx_id: i64,
    ) -> Result<Vec<Posting>, TrackerError> {
        self.active_transaction(user_id, tx_id).await?;
        Ok(self
            .storage
            .get_postings(tx_id)
            .await?
            .into_iter()
            .filter(|p| p.active)
            .collect())
    }

    async fn resolve_counter_account(
        &self,
        user_id: i64,
        tx: &Transaction,
    ) -> Result<Option<Account>, TrackerError> {
        match tx.counter_account_id {
            Some(id) => Ok(Some(self.active_account(user_id, id).await?)),
            None => Ok(None),
        }
    }

    async fn validate_transaction_shape(
        &self,
        user_id: i64,
        tx: &Transaction,
        account: &Account,
        counter: Option<&Account>,
    ) -> Result<(), TrackerError> {
        if tx.currency != account.currency {
            return Err(TrackerError::CurrencyMismatch {
                expected: account.currency.clone(),
                found: tx.currency.clone(),
            });
        }

        match tx.kind {
            TransactionKind::Income | TransactionKind::Expense => {
                if tx.counter_account_id.is_some()
                    || tx.counter_amount.is_some()
                    || tx.counter_currency.is_some()
                {
                    return Err(TrackerError::UnexpectedCounterField);
                }
                let category_id = tx.category_id.ok_or_else(|| {
                    Self::invalid_input(
                        "category_id",
                        "Missing Category",
                        "Income and expense transactions require a category".to_string(),
                    )
                })?;
                let category = self.owned_category(user_id, category_id).await?;
                let expected = match tx.kind {
                    TransactionKind::Income => CategoryKind::Income,
                    _ => CategoryKind::Expense,
                };
                if category.kind != expected {
                    return Err(TrackerError::CategoryKindMismatch(category_id));
                }
            }
            TransactionKind::Transfer => {
                let counter = counter.ok_or(TrackerError::MissingCounterAccount)?;
                if counter.id == account.id {
                    return Err(Self::invalid_input(
                        "counter_account_id",
                        "Invalid Transfer",
                        "Transfer accounts must differ".to_string(),
                    ));
                }
                if tx.counter_amount.is_some() || tx.counter_currency.is_some() {
                    return Err(TrackerError::UnexpectedCounterField);
                }
                if counter.currency != account.currency {
                    return Err(TrackerError::CurrencyMismatch {
                        expected: account.currency.clone(),
                        found: counter.currency.clone(),
                    });
                }
                if tx.category_id.is_some() {
                    return Err(Self::invalid_input(
                        "category_id",
                        "Invalid Transfer",
                        "Transfer transactions do not carry a category".to_string(),
                    ));
                }
            }
            TransactionKind::Forex => {
                let counter = counter.ok_or(TrackerError::MissingCounterAccount)?;
                if counter.id == account.id {
                    return Err(Self::invalid_input(
                        "counter_account_id",
                        "Invalid Forex",
                        "Forex accounts must differ".to_string(),
                    ));
                }
                let counter_amount = tx.counter_amount.ok_or_else(|| {
                    Self::invalid_input(
                        "counter_amount",
                        "Missing Amount",
                        "Forex transactions require a counter amount".to_string(),
                    )
                })?;
                self.validate_amount_input("counter_amount", counter_amount)?;
                let counter_currency = tx.counter_currency.as_deref().ok_or_else(|| {
                    Self::invalid_input(
                        "counter_currency",
                        "Missing Currency",
                        "Forex transactions require a counter currency".to_string(),
                    )
                })?;
                if counter_currency == tx.currency {
                    return Err(TrackerError::SameCurrencyForex);
                }
                if counter_currency != counter.currency {
                    return Err(TrackerError::CurrencyMismatch {
                        expected: counter.currency.clone(),
                        found: counter_currency.to_string(),
                    });
                }
                if tx.category_id.is_some() {
                    return Err(Self::invalid_input(
                        "category_id",
                        "Invalid Forex",
                        "Forex transactions do not carry a category".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Derives the ledger view of a transaction: one signed entry per touched
    /// account, plus the home-currency equivalent.
    async fn build_postings(
        &self,
        tx: &Transaction,
        home_currency: &str,
    ) -> Result<Vec<Posting>, TrackerError> {
        let mut legs: Vec<(i64, f64, String)> = Vec::with_capacity(2);
        match tx.kind {
            TransactionKind::Income => {
                legs.push((tx.account_id, tx.amount_total, tx.currency.clone()));
            }
            TransactionKind::Expense => {
                legs.push((tx.account_id, -tx.amount_total, tx.currency.clone()));
            }
            TransactionKind::Transfer => {
                let counter_id = tx.counter_account_id.ok_or(TrackerError::MissingCounterAccount)?;
                legs.push((tx.account_id, -tx.amount_total, tx.currency.clone()));
                legs.push((counter_id, tx.amount_total, tx.currency.clone()));
            }
            TransactionKind::Forex => {
                let counter_id = tx.counter_account_id.ok_or(TrackerError::MissingCounterAccount)?;
                let counter_amount = tx.counter_amount.ok_or(TrackerError::MissingCounterAccount)?;
                let counter_currency = tx
                    .counter_currency
                    .clone()
                    .ok_or(TrackerError::MissingCounterAccount)?;
                legs.push((tx.account_id, -tx.amount_total, tx.currency.clone()));
                legs.push((counter_id, counter_amount, counter_currency));
            }
        }

        let mut postings = Vec::with_capacity(legs.len());
        for (account_id, amount, currency) in legs {
            let (fx_rate, amount_home) = self
                .home_value(amount, &currency, home_currency, tx.date)
                .await?;
            postings.push(Posting {
                id: 0,
                transaction_id: tx.id,
                account_id,
                amount,
                currency,
                fx_rate,
                amount_home,
                active: true,
            });
        }
        Ok(postings)
    }

    /// Converts an amount into the home currency using the stored monthly
    /// rate; falls back to 1:1 when no rate exists.
    async fn home_value(
        &self,
        amount: f64,
        currency: &str,
        home_currency: &str,
        date: NaiveDate,
    ) -> Result<(Option<f64>, f64), TrackerError> {
        if currency == home_currency {
            return Ok((None, amount));
        }
        match self
            .storage
            .get_fx_rate_by_key(currency, home_currency, date.year(), date.month())
            .await?
        {
            Some(rate) => Ok((Some(rate.rate), round2(amount * rate.rate))),
            None => Ok((None, amount)),
        }
    }
}

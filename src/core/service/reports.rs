use std::collections::HashMap;
use std::time::Duration;

use chrono::Datelike;
use tracing::debug;

use crate::constants::{BALANCES_CACHE_TTL_SECS, SPLIT_TOLERANCE};
use crate::core::errors::TrackerError;
use crate::core::models::{
    AccountBalance, AppLog, BudgetProgressRow, PersonDebt, TransactionKind,
};
use crate::core::service::{FinanceService, round2};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    /// Per-account balance: opening balance plus the sum of active postings.
    /// Served from the cache until a mutation invalidates it.
    pub async fn report_balances(&self, user_id: i64) -> Result<Vec<AccountBalance>, TrackerError> {
        if let Some(cached) = self.cache.get_balances(user_id).await? {
            debug!("Balances report for user {} served from cache", user_id);
            return Ok(cached);
        }

        let mut sums: HashMap<i64, f64> = HashMap::new();
        for tx in self
            .storage
            .list_transactions(user_id)
            .await?
            .iter()
            .filter(|t| t.active)
        {
            for posting in self
                .storage
                .get_postings(tx.id)
                .await?
                .iter()
                .filter(|p| p.active)
            {
                *sums.entry(posting.account_id).or_insert(0.0) += posting.amount;
            }
        }

        let balances: Vec<AccountBalance> = self
            .storage
            .list_accounts(user_id)
            .await?
            .into_iter()
            .filter(|a| a.active)
            .map(|account| AccountBalance {
                balance: round2(account.opening_balance + sums.get(&account.id).copied().unwrap_or(0.0)),
                account_id: account.id,
                account_name: account.name,
                kind: account.kind,
                currency: account.currency,
            })
            .collect();

        self.cache
            .save_balances(user_id, &balances, Duration::from_secs(BALANCES_CACHE_TTL_SECS))
            .await?;
        Ok(balances)
    }

    /// Per-person open debt: shares held in active expense transactions,
    /// less shares in active income transactions (repayments). The owner's
    /// own person is excluded.
    pub async fn report_debts(&self, user_id: i64) -> Result<Vec<PersonDebt>, TrackerError> {
        let mut debts: HashMap<i64, f64> = HashMap::new();
        for tx in self
            .storage
            .list_transactions(user_id)
            .await?
            .iter()
            .filter(|t| t.active)
        {
            let sign = match tx.kind {
                TransactionKind::Expense => 1.0,
                TransactionKind::Income => -1.0,
                _ => continue,
            };
            for split in self
                .storage
                .get_splits(tx.id)
                .await?
                .iter()
                .filter(|s| s.active)
            {
                *debts.entry(split.person_id).or_insert(0.0) += sign * split.amount;
            }
        }

        Ok(self
            .storage
            .list_people(user_id)
            .await?
            .into_iter()
            .filter(|p| p.active && !p.is_me)
            .map(|person| {
                let debt = round2(debts.get(&person.id).copied().unwrap_or(0.0));
                PersonDebt {
                    person_id: person.id,
                    person_name: person.name,
                    debt,
                    is_active: debt.abs() > SPLIT_TOLERANCE,
                }
            })
            .collect())
    }

    /// Budgeted vs. actual spending per category for one month of a year.
    pub async fn report_budget_progress(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<BudgetProgressRow>, TrackerError> {
        self.validate_month("month", month)?;

        let mut actuals: HashMap<i64, f64> = HashMap::new();
        for tx in self
            .storage
            .list_transactions(user_id)
            .await?
            .iter()
            .filter(|t| {
                t.active
                    && t.kind == TransactionKind::Expense
                    && t.date.year() == year
                    && t.date.month() == month
            })
        {
            if let Some(category_id) = tx.category_id {
                *actuals.entry(category_id).or_insert(0.0) += tx.amount_total;
            }
        }

        let categories: HashMap<i64, String> = self
            .storage
            .list_categories(user_id)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut rows = Vec::new();
        for budget in self
            .storage
            .list_budgets(user_id)
            .await?
            .into_iter()
            .filter(|b| b.year == year)
        {
            for line in budget.lines.iter().filter(|l| l.month == month) {
                let actual = round2(actuals.get(&line.category_id).copied().unwrap_or(0.0));
                let progress = if line.amount > 0.0 {
                    round2(actual / line.amount)
                } else {
                    0.0
                };
                rows.push(BudgetProgressRow {
                    budget_id: budget.id,
                    budget_name: budget.name.clone(),
                    category_id: line.category_id,
                    category_name: categories
                        .get(&line.category_id)
                        .cloned()
                        .unwrap_or_default(),
                    month,
                    budgeted: line.amount,
                    actual,
                    progress,
                });
            }
        }
        Ok(rows)
    }

    pub async fn audit_logs(&self) -> Result<Vec<AppLog>, TrackerError> {
        self.logging.get_logs().await
    }
}

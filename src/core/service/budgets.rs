use serde_json::json;
use tracing::info;

use crate::constants::{BUDGET_CREATED, BUDGET_DELETED, BUDGET_UPDATED, MAX_BUDGET_NAME_LENGTH, MAX_DESCRIPTION_LENGTH};
use crate::core::errors::TrackerError;
use crate::core::models::{Budget, BudgetLine, BudgetPatch, NewBudget, NewBudgetLine};
use crate::core::service::FinanceService;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn list_budgets(&self, user_id: i64) -> Result<Vec<Budget>, TrackerError> {
        self.storage.list_budgets(user_id).await
    }

    pub async fn create_budget(&self, user_id: i64, input: NewBudget) -> Result<Budget, TrackerError> {
        info!("Creating budget '{}' ({}) for user {}", input.name, input.year, user_id);
        self.active_user(user_id).await?;
        self.validate_string_input("name", &input.name, MAX_BUDGET_NAME_LENGTH)?;
        self.validate_unique_budget(user_id, &input.name, input.year, None)
            .await?;
        let lines = self.validate_budget_lines(user_id, input.lines).await?;

        let budget = self
            .storage
            .create_budget(Budget {
                id: 0,
                user_id,
                name: input.name,
                year: input.year,
                lines,
            })
            .await?;

        self.log_action(
            BUDGET_CREATED,
            json!({ "budget_id": budget.id, "name": budget.name, "year": budget.year }),
            Some(user_id),
        )
        .await?;
        Ok(budget)
    }

    pub async fn get_budget(&self, user_id: i64, budget_id: i64) -> Result<Budget, TrackerError> {
        self.owned_budget(user_id, budget_id).await
    }

    /// Budget header restricted to a single month's lines.
    pub async fn get_budget_month(
        &self,
        user_id: i64,
        budget_id: i64,
        month: u32,
    ) -> Result<Budget, TrackerError> {
        self.validate_month("month", month)?;
        let mut budget = self.owned_budget(user_id, budget_id).await?;
        budget.lines.retain(|line| line.month == month);
        Ok(budget)
    }

    pub async fn update_budget(
        &self,
        user_id: i64,
        budget_id: i64,
        patch: BudgetPatch,
    ) -> Result<Budget, TrackerError> {
        let mut budget = self.owned_budget(user_id, budget_id).await?;

        if let Some(name) = patch.name {
            self.validate_string_input("name", &name, MAX_BUDGET_NAME_LENGTH)?;
            self.validate_unique_budget(user_id, &name, budget.year, Some(budget_id))
                .await?;
            budget.name = name;
        }
        if let Some(lines) = patch.lines {
            budget.lines = self.validate_budget_lines(user_id, lines).await?;
        }

        let updated = self.storage.update_budget(budget).await?;
        self.log_action(BUDGET_UPDATED, json!({ "budget_id": budget_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<(), TrackerError> {
        self.owned_budget(user_id, budget_id).await?;
        self.storage.delete_budget(budget_id).await?;
        self.log_action(BUDGET_DELETED, json!({ "budget_id": budget_id }), Some(user_id))
            .await?;
        Ok(())
    }

    async fn owned_budget(&self, user_id: i64, budget_id: i64) -> Result<Budget, TrackerError> {
        self.storage
            .get_budget(budget_id)
            .await?
            .filter(|b| b.user_id == user_id)
            .ok_or(TrackerError::BudgetNotFound(budget_id))
    }

    async fn validate_unique_budget(
        &self,
        user_id: i64,
        name: &str,
        year: i32,
        exclude_id: Option<i64>,
    ) -> Result<(), TrackerError> {
        let duplicate = self
            .storage
            .list_budgets(user_id)
            .await?
            .iter()
            .any(|b| b.name == name && b.year == year && Some(b.id) != exclude_id);
        if duplicate {
            return Err(TrackerError::BudgetAlreadyExists(name.to_string(), year));
        }
        Ok(())
    }

    async fn validate_budget_lines(
        &self,
        user_id: i64,
        lines: Vec<NewBudgetLine>,
    ) -> Result<Vec<BudgetLine>, TrackerError> {
        let mut validated = Vec::with_capacity(lines.len());
        for line in lines {
            self.validate_month("month", line.month)?;
            self.validate_non_negative_amount("amount", line.amount)?;
            if let Some(ref description) = line.description {
                self.validate_string_input("description", description, MAX_DESCRIPTION_LENGTH)?;
            }
            self.owned_category(user_id, line.category_id).await?;
            validated.push(BudgetLine {
                id: 0,
                month: line.month,
                category_id: line.category_id,
                amount: line.amount,
                description: line.description,
            });
        }
        Ok(validated)
    }
}

use serde_json::json;
use tracing::{info, warn};

use crate::constants::{CATEGORY_CREATED, CATEGORY_DELETED, CATEGORY_UPDATED};
use crate::core::errors::TrackerError;
use crate::core::models::{Category, CategoryKind};
use crate::core::service::FinanceService;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>, TrackerError> {
        self.storage.list_categories(user_id).await
    }

    pub async fn create_category(
        &self,
        user_id: i64,
        name: String,
        kind: CategoryKind,
    ) -> Result<Category, TrackerError> {
        info!("Creating category '{}' for user {}", name, user_id);
        self.active_user(user_id).await?;
        self.validate_name(&name)?;
        self.validate_unique_category(user_id, &name, None).await?;

        let category = self
            .storage
            .create_category(Category {
                id: 0,
                user_id,
                name,
                kind,
            })
            .await?;

        self.log_action(
            CATEGORY_CREATED,
            json!({ "category_id": category.id, "name": category.name }),
            Some(user_id),
        )
        .await?;
        Ok(category)
    }

    pub async fn get_category(&self, user_id: i64, category_id: i64) -> Result<Category, TrackerError> {
        self.owned_category(user_id, category_id).await
    }

    pub async fn update_category(
        &self,
        user_id: i64,
        category_id: i64,
        name: Option<String>,
        kind: Option<CategoryKind>,
    ) -> Result<Category, TrackerError> {
        let mut category = self.owned_category(user_id, category_id).await?;

        if let Some(name) = name {
            self.validate_name(&name)?;
            self.validate_unique_category(user_id, &name, Some(category_id))
                .await?;
            category.name = name;
        }
        if let Some(kind) = kind
            && kind != category.kind
        {
            // Kind changes would retroactively invalidate recorded transactions.
            if self.category_in_use(user_id, category_id).await? {
                warn!("Category {} kind change rejected, in use", category_id);
                return Err(TrackerError::CategoryInUse(category_id));
            }
            category.kind = kind;
        }

        let updated = self.storage.update_category(category).await?;
        self.log_action(CATEGORY_UPDATED, json!({ "category_id": category_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn delete_category(&self, user_id: i64, category_id: i64) -> Result<(), TrackerError> {
        self.owned_category(user_id, category_id).await?;

        if self.category_in_use(user_id, category_id).await? {
            warn!("Category {} still referenced", category_id);
            return Err(TrackerError::CategoryInUse(category_id));
        }

        self.storage.delete_category(category_id).await?;
        self.log_action(CATEGORY_DELETED, json!({ "category_id": category_id }), Some(user_id))
            .await?;
        Ok(())
    }

    async fn validate_unique_category(
        &self,
        user_id: i64,
        name: &str,
        exclude_id: Option<i64>,
    ) -> Result<(), TrackerError> {
        let duplicate = self
            .storage
            .list_categories(user_id)
            .await?
            .iter()
            .any(|c| c.name == name && Some(c.id) != exclude_id);
        if duplicate {
            return Err(TrackerError::CategoryAlreadyExists(name.to_string()));
        }
        Ok(())
    }

    async fn category_in_use(&self, user_id: i64, category_id: i64) -> Result<bool, TrackerError> {
        let referenced_by_tx = self
            .storage
            .list_transactions(user_id)
            .await?
            .iter()
            .any(|t| t.active && t.category_id == Some(category_id));
        if referenced_by_tx {
            return Ok(true);
        }
        let referenced_by_budget = self
            .storage
            .list_budgets(user_id)
            .await?
            .iter()
            .any(|b| b.lines.iter().any(|l| l.category_id == category_id));
        Ok(referenced_by_budget)
    }
}

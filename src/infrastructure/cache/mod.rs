pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::TrackerError;
use crate::core::models::AccountBalance;
use async_trait::async_trait;

/// Read-through cache for the balances report.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_balances(&self, user_id: i64) -> Result<Option<Vec<AccountBalance>>, TrackerError>;
    async fn save_balances(
        &self,
        user_id: i64,
        balances: &[AccountBalance],
        ttl: std::time::Duration,
    ) -> Result<(), TrackerError>;
    async fn invalidate_balances(&self, user_id: i64) -> Result<(), TrackerError>;
}

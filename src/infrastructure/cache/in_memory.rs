use crate::core::errors::TrackerError;
use crate::core::models::AccountBalance;
use crate::infrastructure::cache::{Cache, cache_keys};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (Vec<AccountBalance>, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_balances(&self, user_id: i64) -> Result<Option<Vec<AccountBalance>>, TrackerError> {
        let cache = self.cache.read().await;
        let key = cache_keys::balances_key(user_id);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > chrono::Utc::now())
            .map(|(balances, _)| balances.clone()))
    }

    async fn save_balances(
        &self,
        user_id: i64,
        balances: &[AccountBalance],
        ttl: std::time::Duration,
    ) -> Result<(), TrackerError> {
        let mut cache = self.cache.write().await;
        let key = cache_keys::balances_key(user_id);
        let expiry = chrono::Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| TrackerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        cache.insert(key, (balances.to_vec(), expiry));
        Ok(())
    }

    async fn invalidate_balances(&self, user_id: i64) -> Result<(), TrackerError> {
        let mut cache = self.cache.write().await;
        cache.remove(&cache_keys::balances_key(user_id));
        Ok(())
    }
}

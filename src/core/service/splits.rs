use std::collections::HashSet;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::constants::{SPLITS_CLEARED, SPLITS_REPLACED, SPLIT_TOLERANCE};
use crate::core::errors::TrackerError;
use crate::core::models::{ShareInput, Split, SplitSource, SplitValidation};
use crate::core::service::{FinanceService, round2};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn get_splits(&self, user_id: i64, tx_id: i64) -> Result<Vec<Split>, TrackerError> {
        self.active_transaction(user_id, tx_id).await?;
        Ok(self
            .storage
            .get_splits(tx_id)
            .await?
            .into_iter()
            .filter(|s| s.active)
            .collect())
    }

    /// Replaces a transaction's share set wholesale. The submission is
    /// rejected, and nothing is stored, unless the shares sum to the
    /// transaction total within [`SPLIT_TOLERANCE`]. Zero-amount entries are
    /// kept so the full participant list survives the round trip.
    pub async fn set_splits(
        &self,
        user_id: i64,
        tx_id: i64,
        payer_person_id: i64,
        shares: Vec<ShareInput>,
    ) -> Result<Vec<Split>, TrackerError> {
        info!(
            "Setting {} splits on transaction {} for user {}",
            shares.len(),
            tx_id,
            user_id
        );
        let mut tx = self.active_transaction(user_id, tx_id).await?;
        let payer = self.active_person(user_id, payer_person_id).await?;

        let mut seen = HashSet::new();
        for share in &shares {
            if !seen.insert(share.person_id) {
                return Err(TrackerError::DuplicateSplitPerson(share.person_id));
            }
            self.validate_non_negative_amount("amount", share.amount)?;
        }
        let people = shares
            .iter()
            .map(|share| self.active_person(user_id, share.person_id))
            .collect::<Vec<_>>();
        futures::future::try_join_all(people).await?;

        let share_sum: f64 = shares.iter().map(|s| s.amount).sum();
        let remaining = tx.amount_total - share_sum;
        if remaining.abs() > SPLIT_TOLERANCE {
            warn!(
                "Splits sum {} does not match transaction amount {}",
                share_sum, tx.amount_total
            );
            return Err(TrackerError::SplitMismatch {
                expected: tx.amount_total,
                actual: round2(share_sum),
            });
        }

        let splits: Vec<Split> = shares
            .into_iter()
            .map(|share| Split {
                id: 0,
                transaction_id: tx_id,
                person_id: share.person_id,
                amount: share.amount,
                source: share.source.unwrap_or(SplitSource::UserManual),
                active: true,
                deleted_at: None,
            })
            .collect();

        let created = self.storage.replace_splits(tx_id, splits).await?;

        if tx.payer_person_id != payer.id {
            tx.payer_person_id = payer.id;
            tx.updated_at = Utc::now();
            self.storage.update_transaction(tx).await?;
        }

        self.log_action(
            SPLITS_REPLACED,
            json!({
                "transaction_id": tx_id,
                "payer_person_id": payer.id,
                "share_count": created.len(),
                "share_sum": round2(share_sum)
            }),
            Some(user_id),
        )
        .await?;

        Ok(created)
    }

    pub async fn clear_splits(&self, user_id: i64, tx_id: i64) -> Result<(), TrackerError> {
        self.active_transaction(user_id, tx_id).await?;
        self.storage.replace_splits(tx_id, Vec::new()).await?;
        self.log_action(SPLITS_CLEARED, json!({ "transaction_id": tx_id }), Some(user_id))
            .await?;
        Ok(())
    }

    pub async fn validate_splits(
        &self,
        user_id: i64,
        tx_id: i64,
    ) -> Result<SplitValidation, TrackerError> {
        let tx = self.active_transaction(user_id, tx_id).await?;
        let share_sum: f64 = self
            .storage
            .get_splits(tx_id)
            .await?
            .iter()
            .filter(|s| s.active)
            .map(|s| s.amount)
            .sum();
        let remaining = round2(tx.amount_total - share_sum);
        Ok(SplitValidation {
            amount_total: tx.amount_total,
            share_sum: round2(share_sum),
            remaining,
            is_reconciled: remaining.abs() <= SPLIT_TOLERANCE,
        })
    }
}

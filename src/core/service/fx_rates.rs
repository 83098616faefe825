use serde_json::json;
use tracing::info;

use crate::constants::{FX_RATE_CREATED, FX_RATE_DELETED, FX_RATE_UPDATED};
use crate::core::errors::TrackerError;
use crate::core::models::{FxRate, NewFxRate};
use crate::core::service::FinanceService;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

fn fx_key(from: &str, to: &str, year: i32, month: u32) -> String {
    format!("{}->{} {}-{:02}", from, to, year, month)
}

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn list_fx_rates(&self) -> Result<Vec<FxRate>, TrackerError> {
        self.storage.list_fx_rates().await
    }

    pub async fn create_fx_rate(&self, user_id: i64, input: NewFxRate) -> Result<FxRate, TrackerError> {
        let from = self.validate_currency_code("from_currency", &input.from_currency)?;
        let to = self.validate_currency_code("to_currency", &input.to_currency)?;
        if from == to {
            return Err(Self::invalid_input(
                "to_currency",
                "Invalid Currency Pair",
                "from_currency and to_currency must differ".to_string(),
            ));
        }
        self.validate_month("month", input.month)?;
        Self::validate_rate(input.rate)?;

        if self
            .storage
            .get_fx_rate_by_key(&from, &to, input.year, input.month)
            .await?
            .is_some()
        {
            return Err(TrackerError::FxRateAlreadyExists(fx_key(
                &from, &to, input.year, input.month,
            )));
        }

        info!("Storing FX rate {}", fx_key(&from, &to, input.year, input.month));
        let fx_rate = self
            .storage
            .create_fx_rate(FxRate {
                id: 0,
                from_currency: from,
                to_currency: to,
                year: input.year,
                month: input.month,
                rate: input.rate,
            })
            .await?;

        self.log_action(
            FX_RATE_CREATED,
            json!({ "fx_rate_id": fx_rate.id, "rate": fx_rate.rate }),
            Some(user_id),
        )
        .await?;
        Ok(fx_rate)
    }

    pub async fn get_fx_rate(&self, fx_rate_id: i64) -> Result<FxRate, TrackerError> {
        self.storage
            .get_fx_rate(fx_rate_id)
            .await?
            .ok_or(TrackerError::FxRateNotFound(fx_rate_id))
    }

    pub async fn update_fx_rate(
        &self,
        user_id: i64,
        fx_rate_id: i64,
        rate: f64,
    ) -> Result<FxRate, TrackerError> {
        let mut fx_rate = self.get_fx_rate(fx_rate_id).await?;
        Self::validate_rate(rate)?;
        fx_rate.rate = rate;
        let updated = self.storage.update_fx_rate(fx_rate).await?;

        self.log_action(
            FX_RATE_UPDATED,
            json!({ "fx_rate_id": fx_rate_id, "rate": rate }),
            Some(user_id),
        )
        .await?;
        Ok(updated)
    }

    pub async fn delete_fx_rate(&self, user_id: i64, fx_rate_id: i64) -> Result<(), TrackerError> {
        self.get_fx_rate(fx_rate_id).await?;
        self.storage.delete_fx_rate(fx_rate_id).await?;
        self.log_action(FX_RATE_DELETED, json!({ "fx_rate_id": fx_rate_id }), Some(user_id))
            .await?;
        Ok(())
    }

    fn validate_rate(rate: f64) -> Result<(), TrackerError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(Self::invalid_input(
                "rate",
                "Invalid Rate",
                "Rate must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::constants::{USER_ACTIVATED, USER_DEACTIVATED, USER_REGISTERED, USER_UPDATED};
use crate::core::errors::{FieldError, TrackerError};
use crate::core::models::User;
use crate::core::service::FinanceService;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        home_currency: String,
    ) -> Result<User, TrackerError> {
        info!("Registering user with email: {}", email);
        if email.is_empty() {
            return Err(TrackerError::MissingEmail);
        }
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(TrackerError::InvalidEmail(email));
        }
        if password.is_empty() {
            return Err(TrackerError::InvalidInput(
                "password".to_string(),
                FieldError {
                    field: "password".to_string(),
                    title: "Invalid password".to_string(),
                    description: "Password cannot be empty".to_string(),
                },
            ));
        }
        self.validate_name(&name)?;
        let home_currency = self.validate_currency_code("home_currency", &home_currency)?;

        if self.storage.get_user_by_email(&email).await?.is_some() {
            warn!("Email {} already registered", email);
            return Err(TrackerError::EmailAlreadyRegistered(email));
        }

        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| TrackerError::InternalServerError(format!("Password hashing error: {}", e)))?;

        let now = Utc::now();
        let user = self
            .storage
            .create_user(User {
                id: 0,
                name,
                email,
                home_currency,
                password_hash,
                active: true,
                deleted_at: None,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.log_action(
            USER_REGISTERED,
            json!({ "user_id": user.id, "email": user.email }),
            Some(user.id),
        )
        .await?;

        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, TrackerError> {
        let user = self
            .storage
            .get_user_by_email(email)
            .await?
            .filter(|u| u.active)
            .ok_or(TrackerError::InvalidCredentials)?;

        if bcrypt::verify(password, &user.password_hash)
            .map_err(|e| TrackerError::InternalServerError(format!("Password verification error: {}", e)))?
        {
            self.jwt_service.generate_token(user.id, "USER")
        } else {
            Err(TrackerError::InvalidCredentials)
        }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, TrackerError> {
        Ok(self
            .storage
            .list_users()
            .await?
            .into_iter()
            .filter(|u| u.active)
            .collect())
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User, TrackerError> {
        self.active_user(user_id).await
    }

    pub async fn update_user(
        &self,
        user_id: i64,
        name: Option<String>,
        email: Option<String>,
        home_currency: Option<String>,
    ) -> Result<User, TrackerError> {
        let mut user = self.active_user(user_id).await?;

        if let Some(name) = name {
            self.validate_name(&name)?;
            user.name = name;
        }
        if let Some(email) = email {
            if !email.contains('@') || !email.contains('.') || email.len() < 5 {
                return Err(TrackerError::InvalidEmail(email));
            }
            if let Some(existing) = self.storage.get_user_by_email(&email).await?
                && existing.id != user_id
            {
                return Err(TrackerError::EmailAlreadyRegistered(email));
            }
            user.email = email;
        }
        if let Some(currency) = home_currency {
            user.home_currency = self.validate_currency_code("home_currency", &currency)?;
        }
        user.updated_at = Utc::now();

        let updated = self.storage.update_user(user).await?;
        self.log_action(USER_UPDATED, json!({ "user_id": user_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn deactivate_user(&self, user_id: i64) -> Result<User, TrackerError> {
        let mut user = self.active_user(user_id).await?;

        let active_count = self
            .storage
            .list_users()
            .await?
            .iter()
            .filter(|u| u.active)
            .count();
        if active_count <= 1 {
            warn!("Refusing to deactivate last active user {}", user_id);
            return Err(TrackerError::CannotDeactivateLastUser);
        }

        let now = Utc::now();
        user.active = false;
        user.deleted_at = Some(now);
        user.updated_at = now;
        let updated = self.storage.update_user(user).await?;

        self.log_action(USER_DEACTIVATED, json!({ "user_id": user_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn activate_user(&self, user_id: i64) -> Result<User, TrackerError> {
        let mut user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or(TrackerError::UserNotFound(user_id))?;
        if user.active {
            return Err(TrackerError::AlreadyActive("User".to_string()));
        }

        user.active = true;
        user.deleted_at = None;
        user.updated_at = Utc::now();
        let updated = self.storage.update_user(user).await?;

        self.log_action(USER_ACTIVATED, json!({ "user_id": user_id }), Some(user_id))
            .await?;
        Ok(updated)
    }
}

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::constants::{PERSON_ACTIVATED, PERSON_CREATED, PERSON_DEACTIVATED, PERSON_UPDATED};
use crate::core::errors::TrackerError;
use crate::core::models::Person;
use crate::core::service::FinanceService;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;

impl<L: LoggingService, S: Storage, C: Cache> FinanceService<L, S, C> {
    pub async fn list_people(&self, user_id: i64) -> Result<Vec<Person>, TrackerError> {
        Ok(self
            .storage
            .list_people(user_id)
            .await?
            .into_iter()
            .filter(|p| p.active)
            .collect())
    }

    pub async fn create_person(
        &self,
        user_id: i64,
        name: String,
        is_me: bool,
    ) -> Result<Person, TrackerError> {
        info!("Creating person '{}' for user {}", name, user_id);
        self.active_user(user_id).await?;
        self.validate_name(&name)?;
        self.validate_unique_person(user_id, &name, is_me, None).await?;

        let person = self
            .storage
            .create_person(Person {
                id: 0,
                user_id,
                name,
                is_me,
                active: true,
                deleted_at: None,
            })
            .await?;

        self.log_action(
            PERSON_CREATED,
            json!({ "person_id": person.id, "name": person.name, "is_me": person.is_me }),
            Some(user_id),
        )
        .await?;
        Ok(person)
    }

    pub async fn get_person(&self, user_id: i64, person_id: i64) -> Result<Person, TrackerError> {
        self.active_person(user_id, person_id).await
    }

    pub async fn update_person(
        &self,
        user_id: i64,
        person_id: i64,
        name: Option<String>,
        is_me: Option<bool>,
    ) -> Result<Person, TrackerError> {
        let mut person = self.active_person(user_id, person_id).await?;

        let new_name = name.unwrap_or_else(|| person.name.clone());
        let new_is_me = is_me.unwrap_or(person.is_me);
        self.validate_name(&new_name)?;
        self.validate_unique_person(user_id, &new_name, new_is_me, Some(person_id))
            .await?;

        person.name = new_name;
        person.is_me = new_is_me;
        let updated = self.storage.update_person(person).await?;

        self.log_action(PERSON_UPDATED, json!({ "person_id": person_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn deactivate_person(&self, user_id: i64, person_id: i64) -> Result<Person, TrackerError> {
        let mut person = self.active_person(user_id, person_id).await?;

        if self.person_in_use(user_id, person_id).await? {
            warn!("Person {} still referenced by transactions", person_id);
            return Err(TrackerError::PersonInUse(person_id));
        }

        person.active = false;
        person.deleted_at = Some(Utc::now());
        let updated = self.storage.update_person(person).await?;

        self.log_action(PERSON_DEACTIVATED, json!({ "person_id": person_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    pub async fn activate_person(&self, user_id: i64, person_id: i64) -> Result<Person, TrackerError> {
        let mut person = self
            .storage
            .get_person(person_id)
            .await?
            .filter(|p| p.user_id == user_id)
            .ok_or(TrackerError::PersonNotFound(person_id))?;
        if person.active {
            return Err(TrackerError::AlreadyActive("Person".to_string()));
        }

        // Re-validate against the people that became active in the meantime.
        self.validate_unique_person(user_id, &person.name, person.is_me, Some(person_id))
            .await?;

        person.active = true;
        person.deleted_at = None;
        let updated = self.storage.update_person(person).await?;

        self.log_action(PERSON_ACTIVATED, json!({ "person_id": person_id }), Some(user_id))
            .await?;
        Ok(updated)
    }

    async fn validate_unique_person(
        &self,
        user_id: i64,
        name: &str,
        is_me: bool,
        exclude_id: Option<i64>,
    ) -> Result<(), TrackerError> {
        let people = self.storage.list_people(user_id).await?;
        let others = people
            .iter()
            .filter(|p| p.active && Some(p.id) != exclude_id);
        for person in others {
            if person.name == name {
                return Err(TrackerError::PersonAlreadyExists(name.to_string()));
            }
            if is_me && person.is_me {
                return Err(TrackerError::MePersonAlreadyExists);
            }
        }
        Ok(())
    }

    async fn person_in_use(&self, user_id: i64, person_id: i64) -> Result<bool, TrackerError> {
        let is_payer = self
            .storage
            .list_transactions(user_id)
            .await?
            .iter()
            .any(|t| t.active && t.payer_person_id == person_id);
        if is_payer {
            return Ok(true);
        }
        let holds_shares = self
            .storage
            .list_splits_for_person(person_id)
            .await?
            .iter()
            .any(|s| s.active);
        Ok(holds_shares)
    }
}

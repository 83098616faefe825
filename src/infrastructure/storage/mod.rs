use crate::core::errors::TrackerError;
use crate::core::models::{
    Account, Budget, Category, FxRate, Person, Posting, Split, Transaction, User,
};
use async_trait::async_trait;

/// Persistence boundary. Implementations assign numeric ids on create and
/// return entities as stored; filtering by active status is the service's
/// concern.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, TrackerError>;
    async fn update_user(&self, user: User) -> Result<User, TrackerError>;
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, TrackerError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, TrackerError>;
    async fn list_users(&self) -> Result<Vec<User>, TrackerError>;

    async fn create_person(&self, person: Person) -> Result<Person, TrackerError>;
    async fn update_person(&self, person: Person) -> Result<Person, TrackerError>;
    async fn get_person(&self, person_id: i64) -> Result<Option<Person>, TrackerError>;
    async fn list_people(&self, user_id: i64) -> Result<Vec<Person>, TrackerError>;

    async fn create_account(&self, account: Account) -> Result<Account, TrackerError>;
    async fn update_account(&self, account: Account) -> Result<Account, TrackerError>;
    async fn get_account(&self, account_id: i64) -> Result<Option<Account>, TrackerError>;
    async fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>, TrackerError>;

    async fn create_category(&self, category: Category) -> Result<Category, TrackerError>;
    async fn update_category(&self, category: Category) -> Result<Category, TrackerError>;
    async fn get_category(&self, category_id: i64) -> Result<Option<Category>, TrackerError>;
    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>, TrackerError>;
    async fn delete_category(&self, category_id: i64) -> Result<(), TrackerError>;

    async fn create_transaction(&self, tx: Transaction) -> Result<Transaction, TrackerError>;
    async fn update_transaction(&self, tx: Transaction) -> Result<Transaction, TrackerError>;
    async fn get_transaction(&self, tx_id: i64) -> Result<Option<Transaction>, TrackerError>;
    async fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>, TrackerError>;

    /// Marks existing postings of the transaction inactive and appends the
    /// given ones with fresh ids.
    async fn replace_postings(
        &self,
        tx_id: i64,
        postings: Vec<Posting>,
    ) -> Result<Vec<Posting>, TrackerError>;
    async fn get_postings(&self, tx_id: i64) -> Result<Vec<Posting>, TrackerError>;
    async fn set_postings_active(&self, tx_id: i64, active: bool) -> Result<(), TrackerError>;

    /// Marks existing splits of the transaction inactive (stamping
    /// `deleted_at`) and appends the given ones with fresh ids.
    async fn replace_splits(
        &self,
        tx_id: i64,
        splits: Vec<Split>,
    ) -> Result<Vec<Split>, TrackerError>;
    async fn get_splits(&self, tx_id: i64) -> Result<Vec<Split>, TrackerError>;
    async fn list_splits_for_person(&self, person_id: i64) -> Result<Vec<Split>, TrackerError>;

    async fn create_budget(&self, budget: Budget) -> Result<Budget, TrackerError>;
    async fn update_budget(&self, budget: Budget) -> Result<Budget, TrackerError>;
    async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>, TrackerError>;
    async fn list_budgets(&self, user_id: i64) -> Result<Vec<Budget>, TrackerError>;
    async fn delete_budget(&self, budget_id: i64) -> Result<(), TrackerError>;

    async fn create_fx_rate(&self, fx_rate: FxRate) -> Result<FxRate, TrackerError>;
    async fn update_fx_rate(&self, fx_rate: FxRate) -> Result<FxRate, TrackerError>;
    async fn get_fx_rate(&self, fx_rate_id: i64) -> Result<Option<FxRate>, TrackerError>;
    async fn get_fx_rate_by_key(
        &self,
        from_currency: &str,
        to_currency: &str,
        year: i32,
        month: u32,
    ) -> Result<Option<FxRate>, TrackerError>;
    async fn list_fx_rates(&self) -> Result<Vec<FxRate>, TrackerError>;
    async fn delete_fx_rate(&self, fx_rate_id: i64) -> Result<(), TrackerError>;
}

pub mod in_memory;

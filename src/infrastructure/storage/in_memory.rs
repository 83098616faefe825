use crate::core::errors::TrackerError;
use crate::core::models::{
    Account, Budget, Category, FxRate, Person, Posting, Split, Transaction, User,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// HashMap-backed storage with per-table sequential id allocation.
#[derive(Clone)]
pub struct InMemoryStorage {
    ids: Arc<IdCounters>,
    users: Arc<RwLock<HashMap<i64, User>>>,
    users_by_email: Arc<RwLock<HashMap<String, i64>>>,
    people: Arc<RwLock<HashMap<i64, Person>>>,
    accounts: Arc<RwLock<HashMap<i64, Account>>>,
    categories: Arc<RwLock<HashMap<i64, Category>>>,
    transactions: Arc<RwLock<HashMap<i64, Transaction>>>,
    postings: Arc<RwLock<HashMap<i64, Vec<Posting>>>>,
    splits: Arc<RwLock<HashMap<i64, Vec<Split>>>>,
    budgets: Arc<RwLock<HashMap<i64, Budget>>>,
    fx_rates: Arc<RwLock<HashMap<i64, FxRate>>>,
}

#[derive(Default)]
struct IdCounters {
    users: AtomicI64,
    people: AtomicI64,
    accounts: AtomicI64,
    categories: AtomicI64,
    transactions: AtomicI64,
    postings: AtomicI64,
    splits: AtomicI64,
    budgets: AtomicI64,
    budget_lines: AtomicI64,
    fx_rates: AtomicI64,
}

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            ids: Arc::new(IdCounters::default()),
            users: Arc::new(RwLock::new(HashMap::new())),
            users_by_email: Arc::new(RwLock::new(HashMap::new())),
            people: Arc::new(RwLock::new(HashMap::new())),
            accounts: Arc::new(RwLock::new(HashMap::new())),
            categories: Arc::new(RwLock::new(HashMap::new())),
            transactions: Arc::new(RwLock::new(HashMap::new())),
            postings: Arc::new(RwLock::new(HashMap::new())),
            splits: Arc::new(RwLock::new(HashMap::new())),
            budgets: Arc::new(RwLock::new(HashMap::new())),
            fx_rates: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, mut user: User) -> Result<User, TrackerError> {
        // Lock order: email index first, then the user table.
        let mut by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        user.id = next(&self.ids.users);
        by_email.insert(user.email.clone(), user.id);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, TrackerError> {
        let mut by_email = self.users_by_email.write().await;
        let mut users = self.users.write().await;
        if let Some(previous) = users.get(&user.id)
            && previous.email != user.email
        {
            by_email.remove(&previous.email);
            by_email.insert(user.email.clone(), user.id);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, TrackerError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, TrackerError> {
        let by_email = self.users_by_email.read().await;
        let users = self.users.read().await;
        Ok(by_email.get(email).and_then(|id| users.get(id).cloned()))
    }

    async fn list_users(&self) -> Result<Vec<User>, TrackerError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn create_person(&self, mut person: Person) -> Result<Person, TrackerError> {
        let mut people = self.people.write().await;
        person.id = next(&self.ids.people);
        people.insert(person.id, person.clone());
        Ok(person)
    }

    async fn update_person(&self, person: Person) -> Result<Person, TrackerError> {
        let mut people = self.people.write().await;
        people.insert(person.id, person.clone());
        Ok(person)
    }

    async fn get_person(&self, person_id: i64) -> Result<Option<Person>, TrackerError> {
        let people = self.people.read().await;
        Ok(people.get(&person_id).cloned())
    }

    async fn list_people(&self, user_id: i64) -> Result<Vec<Person>, TrackerError> {
        let people = self.people.read().await;
        let mut owned: Vec<Person> = people.values().filter(|p| p.user_id == user_id).cloned().collect();
        owned.sort_by_key(|p| p.id);
        Ok(owned)
    }

    async fn create_account(&self, mut account: Account) -> Result<Account, TrackerError> {
        let mut accounts = self.accounts.write().await;
        account.id = next(&self.ids.accounts);
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_account(&self, account: Account) -> Result<Account, TrackerError> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn get_account(&self, account_id: i64) -> Result<Option<Account>, TrackerError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&account_id).cloned())
    }

    async fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>, TrackerError> {
        let accounts = self.accounts.read().await;
        let mut owned: Vec<Account> = accounts.values().filter(|a| a.user_id == user_id).cloned().collect();
        owned.sort_by_key(|a| a.id);
        Ok(owned)
    }

    async fn create_category(&self, mut category: Category) -> Result<Category, TrackerError> {
        let mut categories = self.categories.write().await;
        category.id = next(&self.ids.categories);
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> Result<Category, TrackerError> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_category(&self, category_id: i64) -> Result<Option<Category>, TrackerError> {
        let categories = self.categories.read().await;
        Ok(categories.get(&category_id).cloned())
    }

    async fn list_categories(&self, user_id: i64) -> Result<Vec<Category>, TrackerError> {
        let categories = self.categories.read().await;
        let mut owned: Vec<Category> = categories.values().filter(|c| c.user_id == user_id).cloned().collect();
        owned.sort_by_key(|c| c.id);
        Ok(owned)
    }

    async fn delete_category(&self, category_id: i64) -> Result<(), TrackerError> {
        let mut categories = self.categories.write().await;
        categories.remove(&category_id);
        Ok(())
    }

    async fn create_transaction(&self, mut tx: Transaction) -> Result<Transaction, TrackerError> {
        let mut transactions = self.transactions.write().await;
        tx.id = next(&self.ids.transactions);
        transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn update_transaction(&self, tx: Transaction) -> Result<Transaction, TrackerError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn get_transaction(&self, tx_id: i64) -> Result<Option<Transaction>, TrackerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&tx_id).cloned())
    }

    async fn list_transactions(&self, user_id: i64) -> Result<Vec<Transaction>, TrackerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.values().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn replace_postings(
        &self,
        tx_id: i64,
        postings: Vec<Posting>,
    ) -> Result<Vec<Posting>, TrackerError> {
        // Postings are derived records; replacing drops the old generation.
        let mut all = self.postings.write().await;
        let entry = all.entry(tx_id).or_default();
        entry.clear();
        let mut created = Vec::with_capacity(postings.len());
        for mut posting in postings {
            posting.id = next(&self.ids.postings);
            posting.transaction_id = tx_id;
            entry.push(posting.clone());
            created.push(posting);
        }
        Ok(created)
    }

    async fn get_postings(&self, tx_id: i64) -> Result<Vec<Posting>, TrackerError> {
        let all = self.postings.read().await;
        Ok(all.get(&tx_id).cloned().unwrap_or_default())
    }

    async fn set_postings_active(&self, tx_id: i64, active: bool) -> Result<(), TrackerError> {
        let mut all = self.postings.write().await;
        if let Some(postings) = all.get_mut(&tx_id) {
            for posting in postings.iter_mut() {
                posting.active = active;
            }
        }
        Ok(())
    }

    async fn replace_splits(&self, tx_id: i64, splits: Vec<Split>) -> Result<Vec<Split>, TrackerError> {
        let mut all = self.splits.write().await;
        let entry = all.entry(tx_id).or_default();
        let now = Utc::now();
        for split in entry.iter_mut().filter(|s| s.active) {
            split.active = false;
            split.deleted_at = Some(now);
        }
        let mut created = Vec::with_capacity(splits.len());
        for mut split in splits {
            split.id = next(&self.ids.splits);
            split.transaction_id = tx_id;
            entry.push(split.clone());
            created.push(split);
        }
        Ok(created)
    }

    async fn get_splits(&self, tx_id: i64) -> Result<Vec<Split>, TrackerError> {
        let all = self.splits.read().await;
        Ok(all.get(&tx_id).cloned().unwrap_or_default())
    }

    async fn list_splits_for_person(&self, person_id: i64) -> Result<Vec<Split>, TrackerError> {
        let all = self.splits.read().await;
        Ok(all
            .values()
            .flatten()
            .filter(|s| s.person_id == person_id)
            .cloned()
            .collect())
    }

    async fn create_budget(&self, mut budget: Budget) -> Result<Budget, TrackerError> {
        let mut budgets = self.budgets.write().await;
        budget.id = next(&self.ids.budgets);
        for line in budget.lines.iter_mut() {
            line.id = next(&self.ids.budget_lines);
        }
        budgets.insert(budget.id, budget.clone());
        Ok(budget)
    }

    async fn update_budget(&self, mut budget: Budget) -> Result<Budget, TrackerError> {
        let mut budgets = self.budgets.write().await;
        for line in budget.lines.iter_mut().filter(|l| l.id == 0) {
            line.id = next(&self.ids.budget_lines);
        }
        budgets.insert(budget.id, budget.clone());
        Ok(budget)
    }

    async fn get_budget(&self, budget_id: i64) -> Result<Option<Budget>, TrackerError> {
        let budgets = self.budgets.read().await;
        Ok(budgets.get(&budget_id).cloned())
    }

    async fn list_budgets(&self, user_id: i64) -> Result<Vec<Budget>, TrackerError> {
        let budgets = self.budgets.read().await;
        let mut owned: Vec<Budget> = budgets.values().filter(|b| b.user_id == user_id).cloned().collect();
        owned.sort_by_key(|b| b.id);
        Ok(owned)
    }

    async fn delete_budget(&self, budget_id: i64) -> Result<(), TrackerError> {
        let mut budgets = self.budgets.write().await;
        budgets.remove(&budget_id);
        Ok(())
    }

    async fn create_fx_rate(&self, mut fx_rate: FxRate) -> Result<FxRate, TrackerError> {
        let mut fx_rates = self.fx_rates.write().await;
        fx_rate.id = next(&self.ids.fx_rates);
        fx_rates.insert(fx_rate.id, fx_rate.clone());
        Ok(fx_rate)
    }

    async fn update_fx_rate(&self, fx_rate: FxRate) -> Result<FxRate, TrackerError> {
        let mut fx_rates = self.fx_rates.write().await;
        fx_rates.insert(fx_rate.id, fx_rate.clone());
        Ok(fx_rate)
    }

    async fn get_fx_rate(&self, fx_rate_id: i64) -> Result<Option<FxRate>, TrackerError> {
        let fx_rates = self.fx_rates.read().await;
        Ok(fx_rates.get(&fx_rate_id).cloned())
    }

    async fn get_fx_rate_by_key(
        &self,
        from_currency: &str,
        to_currency: &str,
        year: i32,
        month: u32,
    ) -> Result<Option<FxRate>, TrackerError> {
        let fx_rates = self.fx_rates.read().await;
        Ok(fx_rates
            .values()
            .find(|r| {
                r.from_currency == from_currency
                    && r.to_currency == to_currency
                    && r.year == year
                    && r.month == month
            })
            .cloned())
    }

    async fn list_fx_rates(&self) -> Result<Vec<FxRate>, TrackerError> {
        let fx_rates = self.fx_rates.read().await;
        let mut all: Vec<FxRate> = fx_rates.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn delete_fx_rate(&self, fx_rate_id: i64) -> Result<(), TrackerError> {
        let mut fx_rates = self.fx_rates.write().await;
        fx_rates.remove(&fx_rate_id);
        Ok(())
    }
}

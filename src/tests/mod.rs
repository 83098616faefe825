mod account_tests;
mod category_tests;
mod fx_rate_tests;
mod people_tests;
mod report_tests;
mod transaction_tests;
mod user_tests;

use chrono::NaiveDate;

use crate::core::models::{
    Account, AccountKind, Category, CategoryKind, NewAccount, NewTransaction, Person, Transaction,
    TransactionKind, User,
};
use crate::{FinanceService, InMemoryCache, InMemoryLogging, InMemoryStorage};

pub type TestService = FinanceService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub fn create_test_service() -> TestService {
    FinanceService::new(
        InMemoryStorage::new(),
        InMemoryLogging::new(),
        InMemoryCache::new(),
        "test-secret".to_string(),
    )
}

pub async fn seed_user(service: &TestService, email: &str) -> User {
    service
        .register(
            "Test User".to_string(),
            email.to_string(),
            "hunter2".to_string(),
            "EUR".to_string(),
        )
        .await
        .unwrap()
}

pub struct Fixture {
    pub service: TestService,
    pub user: User,
    pub checking: Account,
    pub groceries: Category,
    pub me: Person,
    pub alice: Person,
    pub bob: Person,
}

/// One user with a checking account, an expense category, and three people
/// (the owner plus two friends).
pub async fn base_fixture() -> Fixture {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    let checking = service
        .create_account(
            user.id,
            NewAccount {
                name: "Checking".to_string(),
                kind: AccountKind::Asset,
                currency: "EUR".to_string(),
                opening_balance: 0.0,
                billing_day: None,
                due_day: None,
            },
        )
        .await
        .unwrap();
    let groceries = service
        .create_category(user.id, "Groceries".to_string(), CategoryKind::Expense)
        .await
        .unwrap();
    let me = service
        .create_person(user.id, "Me".to_string(), true)
        .await
        .unwrap();
    let alice = service
        .create_person(user.id, "Alice".to_string(), false)
        .await
        .unwrap();
    let bob = service
        .create_person(user.id, "Bob".to_string(), false)
        .await
        .unwrap();
    Fixture {
        service,
        user,
        checking,
        groceries,
        me,
        alice,
        bob,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn expense_input(fixture: &Fixture, amount: f64) -> NewTransaction {
    NewTransaction {
        date: date(2024, 1, 15),
        kind: TransactionKind::Expense,
        description: Some("Group dinner".to_string()),
        amount_total: amount,
        currency: None,
        account_id: fixture.checking.id,
        counter_account_id: None,
        counter_amount: None,
        counter_currency: None,
        category_id: Some(fixture.groceries.id),
        payer_person_id: fixture.me.id,
    }
}

pub async fn seed_expense(fixture: &Fixture, amount: f64) -> Transaction {
    fixture
        .service
        .create_transaction(fixture.user.id, expense_input(fixture, amount))
        .await
        .unwrap()
}

use crate::core::errors::TrackerError;
use crate::core::models::{
    AccountKind, CategoryKind, NewAccount, NewFxRate, NewTransaction, ShareInput,
    TransactionFilter, TransactionKind, TransactionPatch,
};
use crate::tests::{base_fixture, date, expense_input, seed_expense};

#[tokio::test]
async fn test_expense_creates_negative_posting() {
    let fixture = base_fixture().await;
    let tx = seed_expense(&fixture, 42.5).await;

    let postings = fixture
        .service
        .get_transaction_postings(fixture.user.id, tx.id)
        .await
        .unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].account_id, fixture.checking.id);
    assert_eq!(postings[0].amount, -42.5);
    assert_eq!(postings[0].currency, "EUR");
    assert_eq!(postings[0].amount_home, -42.5);
    assert!(postings[0].fx_rate.is_none());
}

#[tokio::test]
async fn test_income_creates_positive_posting() {
    let fixture = base_fixture().await;
    let salary = fixture
        .service
        .create_category(fixture.user.id, "Salary".to_string(), CategoryKind::Income)
        .await
        .unwrap();

    let tx = fixture
        .service
        .create_transaction(
            fixture.user.id,
            NewTransaction {
                kind: TransactionKind::Income,
                category_id: Some(salary.id),
                description: Some("January salary".to_string()),
                amount_total: 1800.0,
                ..expense_input(&fixture, 1800.0)
            },
        )
        .await
        .unwrap();

    let postings = fixture
        .service
        .get_transaction_postings(fixture.user.id, tx.id)
        .await
        .unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].amount, 1800.0);
}

#[tokio::test]
async fn test_category_kind_must_match() {
    let fixture = base_fixture().await;
    let salary = fixture
        .service
        .create_category(fixture.user.id, "Salary".to_string(), CategoryKind::Income)
        .await
        .unwrap();

    let mut input = expense_input(&fixture, 10.0);
    input.category_id = Some(salary.id);
    let result = fixture.service.create_transaction(fixture.user.id, input).await;
    assert!(matches!(result, Err(TrackerError::CategoryKindMismatch(_))));
}

#[tokio::test]
async fn test_transfer_posts_both_accounts() {
    let fixture = base_fixture().await;
    let savings = fixture
        .service
        .create_account(
            fixture.user.id,
            NewAccount {
                name: "Savings".to_string(),
                kind: AccountKind::Asset,
                currency: "EUR".to_string(),
                opening_balance: 0.0,
                billing_day: None,
                due_day: None,
            },
        )
        .await
        .unwrap();

    let tx = fixture
        .service
        .create_transaction(
            fixture.user.id,
            NewTransaction {
                kind: TransactionKind::Transfer,
                category_id: None,
                counter_account_id: Some(savings.id),
                description: None,
                ..expense_input(&fixture, 200.0)
            },
        )
        .await
        .unwrap();

    let postings = fixture
        .service
        .get_transaction_postings(fixture.user.id, tx.id)
        .await
        .unwrap();
    assert_eq!(postings.len(), 2);
    assert_eq!(postings[0].account_id, fixture.checking.id);
    assert_eq!(postings[0].amount, -200.0);
    assert_eq!(postings[1].account_id, savings.id);
    assert_eq!(postings[1].amount, 200.0);
}

#[tokio::test]
async fn test_forex_uses_stored_rate_for_home_amount() {
    let fixture = base_fixture().await;
    let usd_account = fixture
        .service
        .create_account(
            fixture.user.id,
            NewAccount {
                name: "USD Wallet".to_string(),
                kind: AccountKind::Asset,
                currency: "USD".to_string(),
                opening_balance: 0.0,
                billing_day: None,
                due_day: None,
            },
        )
        .await
        .unwrap();
    fixture
        .service
        .create_fx_rate(
            fixture.user.id,
            NewFxRate {
                from_currency: "USD".to_string(),
                to_currency: "EUR".to_string(),
                year: 2024,
                month: 1,
                rate: 0.9,
            },
        )
        .await
        .unwrap();

    let tx = fixture
        .service
        .create_transaction(
            fixture.user.id,
            NewTransaction {
                kind: TransactionKind::Forex,
                category_id: None,
                counter_account_id: Some(usd_account.id),
                counter_amount: Some(110.0),
                counter_currency: Some("USD".to_string()),
                description: None,
                ..expense_input(&fixture, 100.0)
            },
        )
        .await
        .unwrap();

    let postings = fixture
        .service
        .get_transaction_postings(fixture.user.id, tx.id)
        .await
        .unwrap();
    assert_eq!(postings.len(), 2);
    // EUR leg is already in the home currency.
    assert_eq!(postings[0].amount, -100.0);
    assert!(postings[0].fx_rate.is_none());
    // USD leg converts through the stored monthly rate.
    assert_eq!(postings[1].amount, 110.0);
    assert_eq!(postings[1].fx_rate, Some(0.9));
    assert_eq!(postings[1].amount_home, 99.0);
}

#[tokio::test]
async fn test_forex_same_currency_rejected() {
    let fixture = base_fixture().await;
    let other = fixture
        .service
        .create_account(
            fixture.user.id,
            NewAccount {
                name: "Second".to_string(),
                kind: AccountKind::Asset,
                currency: "EUR".to_string(),
                opening_balance: 0.0,
                billing_day: None,
                due_day: None,
            },
        )
        .await
        .unwrap();

    let result = fixture
        .service
        .create_transaction(
            fixture.user.id,
            NewTransaction {
                kind: TransactionKind::Forex,
                category_id: None,
                counter_account_id: Some(other.id),
                counter_amount: Some(100.0),
                counter_currency: Some("EUR".to_string()),
                ..expense_input(&fixture, 100.0)
            },
        )
        .await;
    assert!(matches!(result, Err(TrackerError::SameCurrencyForex)));
}

#[tokio::test]
async fn test_currency_must_match_account() {
    let fixture = base_fixture().await;
    let mut input = expense_input(&fixture, 10.0);
    input.currency = Some("USD".to_string());
    let result = fixture.service.create_transaction(fixture.user.id, input).await;
    assert!(matches!(result, Err(TrackerError::CurrencyMismatch { .. })));
}

#[tokio::test]
async fn test_counter_fields_rejected_for_expense() {
    let fixture = base_fixture().await;
    let mut input = expense_input(&fixture, 10.0);
    input.counter_account_id = Some(fixture.checking.id);
    let result = fixture.service.create_transaction(fixture.user.id, input).await;
    assert!(matches!(result, Err(TrackerError::UnexpectedCounterField)));
}

#[tokio::test]
async fn test_amount_precision_rejected() {
    let fixture = base_fixture().await;
    let mut input = expense_input(&fixture, 10.123);
    input.amount_total = 10.123;
    let result = fixture.service.create_transaction(fixture.user.id, input).await;
    assert!(matches!(result, Err(TrackerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_list_ordering_and_filters() {
    let fixture = base_fixture().await;
    let mut older = expense_input(&fixture, 10.0);
    older.date = date(2024, 1, 1);
    let older = fixture.service.create_transaction(fixture.user.id, older).await.unwrap();
    let newer = seed_expense(&fixture, 20.0).await; // 2024-01-15

    let all = fixture
        .service
        .list_transactions(fixture.user.id, TransactionFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, newer.id);
    assert_eq!(all[1].id, older.id);

    let filtered = fixture
        .service
        .list_transactions(
            fixture.user.id,
            TransactionFilter {
                start_date: Some(date(2024, 1, 10)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, newer.id);

    let paged = fixture
        .service
        .list_transactions(
            fixture.user.id,
            TransactionFilter {
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].id, older.id);
}

#[tokio::test]
async fn test_same_date_orders_by_id_desc() {
    let fixture = base_fixture().await;
    let first = seed_expense(&fixture, 10.0).await;
    let second = seed_expense(&fixture, 20.0).await;

    let all = fixture
        .service
        .list_transactions(fixture.user.id, TransactionFilter::default())
        .await
        .unwrap();
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}

#[tokio::test]
async fn test_update_amount_rebuilds_postings_and_clears_splits() {
    let fixture = base_fixture().await;
    let tx = seed_expense(&fixture, 100.0).await;
    fixture
        .service
        .set_splits(
            fixture.user.id,
            tx.id,
            fixture.me.id,
            vec![
                ShareInput {
                    person_id: fixture.alice.id,
                    amount: 60.0,
                    source: None,
                },
                ShareInput {
                    person_id: fixture.bob.id,
                    amount: 40.0,
                    source: None,
                },
            ],
        )
        .await
        .unwrap();

    let updated = fixture
        .service
        .update_transaction(
            fixture.user.id,
            tx.id,
            TransactionPatch {
                amount_total: Some(80.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount_total, 80.0);

    let postings = fixture
        .service
        .get_transaction_postings(fixture.user.id, tx.id)
        .await
        .unwrap();
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].amount, -80.0);

    // The old share set no longer reconciles, so it is dropped.
    let splits = fixture.service.get_splits(fixture.user.id, tx.id).await.unwrap();
    assert!(splits.is_empty());
}

#[tokio::test]
async fn test_deactivate_hides_transaction_and_postings() {
    let fixture = base_fixture().await;
    let tx = seed_expense(&fixture, 30.0).await;

    fixture
        .service
        .deactivate_transaction(fixture.user.id, tx.id)
        .await
        .unwrap();

    let all = fixture
        .service
        .list_transactions(fixture.user.id, TransactionFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
    let result = fixture.service.get_transaction(fixture.user.id, tx.id).await;
    assert!(matches!(result, Err(TrackerError::TransactionNotFound(_))));

    // Balance no longer includes the expense.
    let balances = fixture.service.report_balances(fixture.user.id).await.unwrap();
    assert_eq!(balances[0].balance, 0.0);

    // Activation restores both.
    fixture
        .service
        .activate_transaction(fixture.user.id, tx.id)
        .await
        .unwrap();
    let balances = fixture.service.report_balances(fixture.user.id).await.unwrap();
    assert_eq!(balances[0].balance, -30.0);
}

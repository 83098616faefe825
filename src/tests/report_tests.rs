use crate::core::models::{
    CategoryKind, NewBudget, NewBudgetLine, NewTransaction, ShareInput, TransactionKind,
};
use crate::tests::{base_fixture, date, expense_input, seed_expense};

#[tokio::test]
async fn test_balances_include_opening_and_postings() {
    let fixture = base_fixture().await;
    seed_expense(&fixture, 30.0).await;

    let balances = fixture.service.report_balances(fixture.user.id).await.unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0].account_id, fixture.checking.id);
    assert_eq!(balances[0].balance, -30.0);
    assert_eq!(balances[0].currency, "EUR");
}

#[tokio::test]
async fn test_balances_cache_invalidated_on_mutation() {
    let fixture = base_fixture().await;
    seed_expense(&fixture, 30.0).await;

    let first = fixture.service.report_balances(fixture.user.id).await.unwrap();
    assert_eq!(first[0].balance, -30.0);

    // A second expense must show up even though the report was just cached.
    seed_expense(&fixture, 20.0).await;
    let second = fixture.service.report_balances(fixture.user.id).await.unwrap();
    assert_eq!(second[0].balance, -50.0);
}

#[tokio::test]
async fn test_debts_from_expense_and_repayment() {
    let fixture = base_fixture().await;
    let dinner = seed_expense(&fixture, 90.0).await;
    fixture
        .service
        .set_splits(
            fixture.user.id,
            dinner.id,
            fixture.me.id,
            vec![
                ShareInput {
                    person_id: fixture.me.id,
                    amount: 30.0,
                    source: None,
                },
                ShareInput {
                    person_id: fixture.alice.id,
                    amount: 30.0,
                    source: None,
                },
                ShareInput {
                    person_id: fixture.bob.id,
                    amount: 30.0,
                    source: None,
                },
            ],
        )
        .await
        .unwrap();

    // Alice pays back 10 through a repayment income transaction.
    let repayment_category = fixture
        .service
        .create_category(fixture.user.id, "Repayments".to_string(), CategoryKind::Income)
        .await
        .unwrap();
    let repayment = fixture
        .service
        .create_transaction(
            fixture.user.id,
            NewTransaction {
                kind: TransactionKind::Income,
                category_id: Some(repayment_category.id),
                description: None,
                amount_total: 10.0,
                payer_person_id: fixture.alice.id,
                ..expense_input(&fixture, 10.0)
            },
        )
        .await
        .unwrap();
    fixture
        .service
        .set_splits(
            fixture.user.id,
            repayment.id,
            fixture.alice.id,
            vec![ShareInput {
                person_id: fixture.alice.id,
                amount: 10.0,
                source: None,
            }],
        )
        .await
        .unwrap();

    let debts = fixture.service.report_debts(fixture.user.id).await.unwrap();
    // The owner's own person is not listed.
    assert!(debts.iter().all(|d| d.person_id != fixture.me.id));

    let alice = debts.iter().find(|d| d.person_id == fixture.alice.id).unwrap();
    assert_eq!(alice.debt, 20.0);
    assert!(alice.is_active);

    let bob = debts.iter().find(|d| d.person_id == fixture.bob.id).unwrap();
    assert_eq!(bob.debt, 30.0);
    assert!(bob.is_active);
}

#[tokio::test]
async fn test_settled_person_flagged_inactive() {
    let fixture = base_fixture().await;
    let debts = fixture.service.report_debts(fixture.user.id).await.unwrap();
    let alice = debts.iter().find(|d| d.person_id == fixture.alice.id).unwrap();
    assert_eq!(alice.debt, 0.0);
    assert!(!alice.is_active);
}

#[tokio::test]
async fn test_budget_progress() {
    let fixture = base_fixture().await;
    fixture
        .service
        .create_budget(
            fixture.user.id,
            NewBudget {
                name: "2024".to_string(),
                year: 2024,
                lines: vec![NewBudgetLine {
                    month: 1,
                    category_id: fixture.groceries.id,
                    amount: 200.0,
                    description: None,
                }],
            },
        )
        .await
        .unwrap();

    // Two January expenses, one February expense outside the window.
    seed_expense(&fixture, 80.0).await;
    seed_expense(&fixture, 20.0).await;
    let mut february = expense_input(&fixture, 999.0);
    february.date = date(2024, 2, 1);
    fixture
        .service
        .create_transaction(fixture.user.id, february)
        .await
        .unwrap();

    let rows = fixture
        .service
        .report_budget_progress(fixture.user.id, 2024, 1)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_id, fixture.groceries.id);
    assert_eq!(rows[0].budgeted, 200.0);
    assert_eq!(rows[0].actual, 100.0);
    assert_eq!(rows[0].progress, 0.5);

    // No lines for months outside the budget.
    let empty = fixture
        .service
        .report_budget_progress(fixture.user.id, 2024, 3)
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_audit_trail_records_mutations() {
    let fixture = base_fixture().await;
    let tx = seed_expense(&fixture, 50.0).await;
    fixture
        .service
        .set_splits(
            fixture.user.id,
            tx.id,
            fixture.me.id,
            vec![ShareInput {
                person_id: fixture.alice.id,
                amount: 50.0,
                source: None,
            }],
        )
        .await
        .unwrap();

    let logs = fixture.service.audit_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == "transaction_created"));
    assert!(logs.iter().any(|l| l.action == "splits_replaced"));
    assert!(logs.iter().all(|l| !l.id.is_empty()));
}

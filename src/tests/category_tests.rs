use crate::core::errors::TrackerError;
use crate::core::models::{CategoryKind, NewBudget, NewBudgetLine};
use crate::tests::{base_fixture, seed_expense};

#[tokio::test]
async fn test_create_duplicate_category() {
    let fixture = base_fixture().await;
    let result = fixture
        .service
        .create_category(fixture.user.id, "Groceries".to_string(), CategoryKind::Expense)
        .await;
    assert!(matches!(result, Err(TrackerError::CategoryAlreadyExists(_))));
}

#[tokio::test]
async fn test_delete_category_in_use_by_transaction() {
    let fixture = base_fixture().await;
    seed_expense(&fixture, 10.0).await;
    let result = fixture
        .service
        .delete_category(fixture.user.id, fixture.groceries.id)
        .await;
    assert!(matches!(result, Err(TrackerError::CategoryInUse(_))));
}

#[tokio::test]
async fn test_delete_category_in_use_by_budget() {
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
                    amount: 100.0,
                    description: None,
                }],
            },
        )
        .await
        .unwrap();

    let result = fixture
        .service
        .delete_category(fixture.user.id, fixture.groceries.id)
        .await;
    assert!(matches!(result, Err(TrackerError::CategoryInUse(_))));
}

#[tokio::test]
async fn test_delete_unused_category() {
    let fixture = base_fixture().await;
    let category = fixture
        .service
        .create_category(fixture.user.id, "Misc".to_string(), CategoryKind::Expense)
        .await
        .unwrap();

    fixture
        .service
        .delete_category(fixture.user.id, category.id)
        .await
        .unwrap();
    let result = fixture.service.get_category(fixture.user.id, category.id).await;
    assert!(matches!(result, Err(TrackerError::CategoryNotFound(_))));
}

#[tokio::test]
async fn test_kind_change_blocked_while_in_use() {
    let fixture = base_fixture().await;
    seed_expense(&fixture, 10.0).await;

    let result = fixture
        .service
        .update_category(
            fixture.user.id,
            fixture.groceries.id,
            None,
            Some(CategoryKind::Income),
        )
        .await;
    assert!(matches!(result, Err(TrackerError::CategoryInUse(_))));

    // Renaming is still allowed.
    let renamed = fixture
        .service
        .update_category(
            fixture.user.id,
            fixture.groceries.id,
            Some("Food".to_string()),
            None,
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Food");
}

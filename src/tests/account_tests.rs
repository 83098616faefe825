use crate::core::errors::TrackerError;
use crate::core::models::{AccountKind, AccountPatch, NewAccount};
use crate::tests::{base_fixture, seed_expense};

fn liability(name: &str) -> NewAccount {
    NewAccount {
        name: name.to_string(),
        kind: AccountKind::Liability,
        currency: "EUR".to_string(),
        opening_balance: 0.0,
        billing_day: Some(5),
        due_day: Some(20),
    }
}

#[tokio::test]
async fn test_create_liability_with_billing_days() {
    let fixture = base_fixture().await;
    let account = fixture
        .service
        .create_account(fixture.user.id, liability("Credit Card"))
        .await
        .unwrap();
    assert_eq!(account.billing_day, Some(5));
    assert_eq!(account.due_day, Some(20));
}

#[tokio::test]
async fn test_asset_rejects_billing_days() {
    let fixture = base_fixture().await;
    let result = fixture
        .service
        .create_account(
            fixture.user.id,
            NewAccount {
                name: "Savings".to_string(),
                kind: AccountKind::Asset,
                currency: "EUR".to_string(),
                opening_balance: 100.0,
                billing_day: Some(5),
                due_day: None,
            },
        )
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_billing_day_out_of_range() {
    let fixture = base_fixture().await;
    let mut input = liability("Credit Card");
    input.billing_day = Some(32);
    let result = fixture.service.create_account(fixture.user.id, input).await;
    assert!(matches!(result, Err(TrackerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_duplicate_account_name_same_kind() {
    let fixture = base_fixture().await;
    let result = fixture
        .service
        .create_account(
            fixture.user.id,
            NewAccount {
                name: "Checking".to_string(),
                kind: AccountKind::Asset,
                currency: "EUR".to_string(),
                opening_balance: 0.0,
                billing_day: None,
                due_day: None,
            },
        )
        .await;
    assert!(matches!(result, Err(TrackerError::AccountAlreadyExists(_))));

    // Same name under another kind is allowed.
    fixture
        .service
        .create_account(fixture.user.id, liability("Checking"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_switching_to_asset_clears_billing_days() {
    let fixture = base_fixture().await;
    let account = fixture
        .service
        .create_account(fixture.user.id, liability("Card"))
        .await
        .unwrap();

    let updated = fixture
        .service
        .update_account(
            fixture.user.id,
            account.id,
            AccountPatch {
                kind: Some(AccountKind::Asset),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.kind, AccountKind::Asset);
    assert_eq!(updated.billing_day, None);
    assert_eq!(updated.due_day, None);
}

#[tokio::test]
async fn test_deactivate_account_in_use() {
    let fixture = base_fixture().await;
    seed_expense(&fixture, 25.0).await;
    let result = fixture
        .service
        .deactivate_account(fixture.user.id, fixture.checking.id)
        .await;
    assert!(matches!(result, Err(TrackerError::AccountInUse(_))));
}

#[tokio::test]
async fn test_deactivate_and_activate_account() {
    let fixture = base_fixture().await;
    let account = fixture
        .service
        .create_account(fixture.user.id, liability("Card"))
        .await
        .unwrap();

    fixture
        .service
        .deactivate_account(fixture.user.id, account.id)
        .await
        .unwrap();
    let accounts = fixture.service.list_accounts(fixture.user.id).await.unwrap();
    assert!(accounts.iter().all(|a| a.id != account.id));

    let restored = fixture
        .service
        .activate_account(fixture.user.id, account.id)
        .await
        .unwrap();
    assert!(restored.active);
}

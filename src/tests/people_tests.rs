use crate::core::errors::TrackerError;
use crate::core::models::ShareInput;
use crate::tests::{base_fixture, create_test_service, seed_expense, seed_user};

#[tokio::test]
async fn test_create_person_duplicate_name() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    service.create_person(user.id, "Alice".to_string(), false).await.unwrap();
    let result = service.create_person(user.id, "Alice".to_string(), false).await;
    assert!(matches!(result, Err(TrackerError::PersonAlreadyExists(_))));
}

#[tokio::test]
async fn test_only_one_me_person() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    service.create_person(user.id, "Me".to_string(), true).await.unwrap();
    let result = service.create_person(user.id, "Also Me".to_string(), true).await;
    assert!(matches!(result, Err(TrackerError::MePersonAlreadyExists)));
}

#[tokio::test]
async fn test_update_person_cannot_become_second_me() {
    let fixture = base_fixture().await;
    let result = fixture
        .service
        .update_person(fixture.user.id, fixture.alice.id, None, Some(true))
        .await;
    assert!(matches!(result, Err(TrackerError::MePersonAlreadyExists)));

    // Dropping the flag on the current me frees it up.
    fixture
        .service
        .update_person(fixture.user.id, fixture.me.id, None, Some(false))
        .await
        .unwrap();
    let promoted = fixture
        .service
        .update_person(fixture.user.id, fixture.alice.id, None, Some(true))
        .await
        .unwrap();
    assert!(promoted.is_me);
}

#[tokio::test]
async fn test_deactivate_payer_rejected() {
    let fixture = base_fixture().await;
    seed_expense(&fixture, 50.0).await;

    let result = fixture
        .service
        .deactivate_person(fixture.user.id, fixture.me.id)
        .await;
    assert!(matches!(result, Err(TrackerError::PersonInUse(_))));
}

#[tokio::test]
async fn test_deactivate_person_with_shares_rejected() {
    let fixture = base_fixture().await;
    let tx = seed_expense(&fixture, 50.0).await;
    fixture
        .service
        .set_splits(
            fixture.user.id,
            tx.id,
            fixture.me.id,
            vec![
                ShareInput {
                    person_id: fixture.alice.id,
                    amount: 50.0,
                    source: None,
                },
            ],
        )
        .await
        .unwrap();

    let result = fixture
        .service
        .deactivate_person(fixture.user.id, fixture.alice.id)
        .await;
    assert!(matches!(result, Err(TrackerError::PersonInUse(_))));

    // Clearing the splits releases the person.
    fixture.service.clear_splits(fixture.user.id, tx.id).await.unwrap();
    let deactivated = fixture
        .service
        .deactivate_person(fixture.user.id, fixture.alice.id)
        .await
        .unwrap();
    assert!(!deactivated.active);
    assert!(deactivated.deleted_at.is_some());
}

#[tokio::test]
async fn test_deactivated_person_invisible_and_name_reusable() {
    let fixture = base_fixture().await;
    fixture
        .service
        .deactivate_person(fixture.user.id, fixture.bob.id)
        .await
        .unwrap();

    let people = fixture.service.list_people(fixture.user.id).await.unwrap();
    assert!(people.iter().all(|p| p.id != fixture.bob.id));

    // The name is only reserved among active people.
    fixture
        .service
        .create_person(fixture.user.id, "Bob".to_string(), false)
        .await
        .unwrap();

    // Reactivating the old Bob would collide with the new one.
    let result = fixture
        .service
        .activate_person(fixture.user.id, fixture.bob.id)
        .await;
    assert!(matches!(result, Err(TrackerError::PersonAlreadyExists(_))));
}

#[tokio::test]
async fn test_people_scoped_per_user() {
    let service = create_test_service();
    let owner = seed_user(&service, "owner@example.com").await;
    let other = seed_user(&service, "other@example.com").await;
    let person = service.create_person(owner.id, "Alice".to_string(), false).await.unwrap();

    let result = service.get_person(other.id, person.id).await;
    assert!(matches!(result, Err(TrackerError::PersonNotFound(_))));
}

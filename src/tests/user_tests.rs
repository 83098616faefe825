use crate::core::errors::TrackerError;
use crate::tests::{create_test_service, seed_user};

#[tokio::test]
async fn test_register_and_login() {
    let service = create_test_service();
    let user = seed_user(&service, "alice@example.com").await;
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.home_currency, "EUR");
    assert!(user.active);

    let token = service.authenticate("alice@example.com", "hunter2").await.unwrap();
    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let service = create_test_service();
    seed_user(&service, "alice@example.com").await;
    let result = service
        .register(
            "Other".to_string(),
            "alice@example.com".to_string(),
            "password".to_string(),
            "EUR".to_string(),
        )
        .await;
    assert!(matches!(result, Err(TrackerError::EmailAlreadyRegistered(_))));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let service = create_test_service();
    let result = service
        .register(
            "Invalid".to_string(),
            "invalid".to_string(),
            "password".to_string(),
            "EUR".to_string(),
        )
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidEmail(_))));
}

#[tokio::test]
async fn test_register_normalizes_currency() {
    let service = create_test_service();
    let user = service
        .register(
            "Carol".to_string(),
            "carol@example.com".to_string(),
            "password".to_string(),
            "usd".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(user.home_currency, "USD");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let service = create_test_service();
    seed_user(&service, "alice@example.com").await;
    let result = service.authenticate("alice@example.com", "wrong").await;
    assert!(matches!(result, Err(TrackerError::InvalidCredentials)));
}

#[tokio::test]
async fn test_cannot_deactivate_last_user() {
    let service = create_test_service();
    let user = seed_user(&service, "alice@example.com").await;
    let result = service.deactivate_user(user.id).await;
    assert!(matches!(result, Err(TrackerError::CannotDeactivateLastUser)));
}

#[tokio::test]
async fn test_deactivated_user_cannot_login() {
    let service = create_test_service();
    let alice = seed_user(&service, "alice@example.com").await;
    seed_user(&service, "bob@example.com").await;

    service.deactivate_user(alice.id).await.unwrap();
    let result = service.authenticate("alice@example.com", "hunter2").await;
    assert!(matches!(result, Err(TrackerError::InvalidCredentials)));

    // Reactivation restores access.
    service.activate_user(alice.id).await.unwrap();
    service.authenticate("alice@example.com", "hunter2").await.unwrap();
}

#[tokio::test]
async fn test_activate_active_user_rejected() {
    let service = create_test_service();
    let user = seed_user(&service, "alice@example.com").await;
    let result = service.activate_user(user.id).await;
    assert!(matches!(result, Err(TrackerError::AlreadyActive(_))));
}

#[tokio::test]
async fn test_update_user_email_conflict() {
    let service = create_test_service();
    let alice = seed_user(&service, "alice@example.com").await;
    seed_user(&service, "bob@example.com").await;

    let result = service
        .update_user(alice.id, None, Some("bob@example.com".to_string()), None)
        .await;
    assert!(matches!(result, Err(TrackerError::EmailAlreadyRegistered(_))));

    let updated = service
        .update_user(alice.id, Some("Alice B".to_string()), None, Some("gbp".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice B");
    assert_eq!(updated.home_currency, "GBP");
}

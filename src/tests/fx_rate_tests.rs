use crate::core::errors::TrackerError;
use crate::core::models::NewFxRate;
use crate::tests::{create_test_service, seed_user};

fn usd_eur(year: i32, month: u32, rate: f64) -> NewFxRate {
    NewFxRate {
        from_currency: "USD".to_string(),
        to_currency: "EUR".to_string(),
        year,
        month,
        rate,
    }
}

#[tokio::test]
async fn test_create_and_get_fx_rate() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;

    let rate = service.create_fx_rate(user.id, usd_eur(2024, 1, 0.92)).await.unwrap();
    assert_eq!(rate.from_currency, "USD");
    assert_eq!(rate.rate, 0.92);

    let fetched = service.get_fx_rate(rate.id).await.unwrap();
    assert_eq!(fetched.id, rate.id);
}

#[tokio::test]
async fn test_duplicate_key_rejected() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    service.create_fx_rate(user.id, usd_eur(2024, 1, 0.92)).await.unwrap();

    let result = service.create_fx_rate(user.id, usd_eur(2024, 1, 0.95)).await;
    assert!(matches!(result, Err(TrackerError::FxRateAlreadyExists(_))));

    // Another month is a different key.
    service.create_fx_rate(user.id, usd_eur(2024, 2, 0.95)).await.unwrap();
}

#[tokio::test]
async fn test_same_currency_pair_rejected() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    let result = service
        .create_fx_rate(
            user.id,
            NewFxRate {
                from_currency: "EUR".to_string(),
                to_currency: "eur".to_string(),
                year: 2024,
                month: 1,
                rate: 1.0,
            },
        )
        .await;
    assert!(matches!(result, Err(TrackerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_non_positive_rate_rejected() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    let result = service.create_fx_rate(user.id, usd_eur(2024, 1, 0.0)).await;
    assert!(matches!(result, Err(TrackerError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_update_and_delete_fx_rate() {
    let service = create_test_service();
    let user = seed_user(&service, "owner@example.com").await;
    let rate = service.create_fx_rate(user.id, usd_eur(2024, 1, 0.92)).await.unwrap();

    let updated = service.update_fx_rate(user.id, rate.id, 0.94).await.unwrap();
    assert_eq!(updated.rate, 0.94);

    service.delete_fx_rate(user.id, rate.id).await.unwrap();
    let result = service.get_fx_rate(rate.id).await;
    assert!(matches!(result, Err(TrackerError::FxRateNotFound(_))));
}

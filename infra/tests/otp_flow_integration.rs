//! End-to-end OTP flow over the in-memory store and the no-op notifier

use std::sync::Arc;
use std::time::Duration;

use otp_core::domain::value_objects::code_parameters::{CodeParameters, Digits, HashAlgorithm};
use otp_core::errors::OtpError;
use otp_core::services::{OtpService, OtpServiceConfig};
use otp_infra::{InMemorySecretStore, NoopNotifier};

fn service() -> (
    OtpService<InMemorySecretStore, NoopNotifier>,
    Arc<InMemorySecretStore>,
    Arc<NoopNotifier>,
) {
    let store = Arc::new(InMemorySecretStore::new());
    let notifier = Arc::new(NoopNotifier::new());
    let config = OtpServiceConfig {
        code: CodeParameters::new(60, Digits::Eight, HashAlgorithm::Sha256, 1).unwrap(),
        send_interval: Duration::from_secs(30),
        ..OtpServiceConfig::default()
    };
    (
        OtpService::new(store.clone(), notifier.clone(), config),
        store,
        notifier,
    )
}

#[tokio::test]
async fn test_send_then_verify() {
    let (service, store, notifier) = service();

    let issued = service.send_code("+79991234567").await.unwrap();
    assert_eq!(issued.code.len(), 8);
    assert!(issued.delivery_id.starts_with("noop_"));
    assert_eq!(notifier.get_message_count(), 1);
    assert_eq!(store.identity_count().await, 1);

    assert!(service.verify_code("+79991234567", &issued.code).await);
    assert!(!service.verify_code("+79990000000", &issued.code).await);
}

#[tokio::test]
async fn test_resend_is_rate_limited() {
    let (service, _store, notifier) = service();

    service.send_code("+79991234567").await.unwrap();
    let err = service.send_code("+79991234567").await.unwrap_err();

    match err {
        OtpError::RateLimited { wait } => {
            assert!(wait > Duration::ZERO);
            assert!(wait <= Duration::from_secs(30));
        }
        other => panic!("Expected rate limit, got {:?}", other),
    }
    assert_eq!(notifier.get_message_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_across_identities() {
    let (service, store, notifier) = service();
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = Arc::clone(&service);
        // Two requests per identity; only one of each pair may go out
        let phone = format!("+7999000{:04}", i / 2);
        handles.push(tokio::spawn(async move { service.send_code(&phone).await }));
    }

    let mut sent = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            sent += 1;
        }
    }

    assert_eq!(sent, 10);
    assert_eq!(notifier.get_message_count(), 10);
    assert_eq!(store.identity_count().await, 10);
}

use otp_core::services::Notifier;

use crate::notifier::NoopNotifier;

#[tokio::test]
async fn test_noop_always_succeeds() {
    let notifier = NoopNotifier::new();

    let first = notifier.send("+15551234567", "123456").await.unwrap();
    let second = notifier.send("not-a-phone", "").await.unwrap();

    assert!(first.starts_with("noop_"));
    assert_ne!(first, second);
    assert_eq!(notifier.get_message_count(), 2);
}

#[tokio::test]
async fn test_noop_clones_share_counter() {
    let notifier = NoopNotifier::new();
    let clone = notifier.clone();

    clone.send("+15551234567", "123456").await.unwrap();
    assert_eq!(notifier.get_message_count(), 1);
}

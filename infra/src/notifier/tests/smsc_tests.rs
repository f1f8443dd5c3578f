use std::time::Duration;

use otp_core::services::Notifier;
use otp_shared::config::SmscSettings;

use crate::notifier::smsc::parse_reply;
use crate::notifier::SmscNotifier;

#[test]
fn test_parse_success_reply() {
    let (id, parts) = parse_reply(r#"{"id":4521,"cnt":1}"#).unwrap();
    assert_eq!(id, "4521");
    assert_eq!(parts, 1);
}

#[test]
fn test_parse_error_reply() {
    let err = parse_reply(r#"{"error":"invalid login","error_code":2}"#).unwrap_err();
    assert_eq!(err, "smsc API error 2: invalid login");
}

#[test]
fn test_parse_zero_error_code_is_success() {
    let (id, parts) = parse_reply(r#"{"id":7,"cnt":2,"error_code":0}"#).unwrap();
    assert_eq!(id, "7");
    assert_eq!(parts, 2);
}

#[test]
fn test_parse_garbage_reply() {
    let err = parse_reply("ERROR = 2 (invalid login)").unwrap_err();
    assert!(err.starts_with("smsc response parse error"));
}

#[test]
fn test_parse_reply_without_id_is_accepted() {
    let (id, parts) = parse_reply(r#"{"error_code":0}"#).unwrap();
    assert_eq!(id, "unknown");
    assert_eq!(parts, 1);

    let (id, _) = parse_reply("{}").unwrap();
    assert_eq!(id, "unknown");
}

#[tokio::test]
async fn test_unreachable_gateway_reports_error_without_password() {
    let notifier = SmscNotifier::new(
        SmscSettings {
            login: "acme".to_string(),
            password: "hunter2".to_string(),
            prefix: String::new(),
            // Reserved port on loopback, nothing listens there
            endpoint: "http://127.0.0.1:9/sys/send.php".to_string(),
        },
        Duration::from_secs(2),
    )
    .unwrap();

    let err = notifier.send("+15551234567", "123456").await.unwrap_err();
    assert!(err.starts_with("smsc send request error"));
    assert!(!err.contains("hunter2"));
}

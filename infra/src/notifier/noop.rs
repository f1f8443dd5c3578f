//! No-op notifier for non-production environments
//!
//! Logs the message instead of delivering it and always succeeds.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use otp_core::services::Notifier;
use otp_shared::phone::mask_phone_number;

/// Notifier that skips delivery
#[derive(Clone, Default)]
pub struct NoopNotifier {
    /// Counter for tracking number of skipped messages
    message_count: Arc<AtomicU64>,
}

impl NoopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages accepted
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, destination: &str, message: &str) -> Result<String, String> {
        let message_id = format!("noop_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "notifier",
            provider = "noop",
            phone = %mask_phone_number(destination),
            message_id = %message_id,
            count = count,
            "Delivery skipped"
        );
        tracing::debug!(target: "notifier", body = %message, "Skipped message body");

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "noop"
    }
}

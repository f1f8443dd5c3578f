//! Notifier Module
//!
//! Delivery providers for one-time codes. Every provider implements the core
//! [`Notifier`] trait and is chosen at startup from configuration.
//!
//! ## Providers
//!
//! - **smsc**: SMS through the SMSC HTTP gateway
//! - **noop**: logs instead of sending, for development

use std::sync::Arc;
use std::time::Duration;

use otp_core::services::Notifier;
use otp_shared::config::{Environment, NotifierSettings};

use crate::InfrastructureError;

pub mod noop;
pub mod smsc;

pub use noop::NoopNotifier;
pub use smsc::SmscNotifier;

#[cfg(test)]
mod tests;

/// Create the configured notifier
///
/// An unknown provider name falls back to the no-op notifier with a warning.
/// The smsc provider fails without credentials rather than silently
/// dropping codes.
pub fn create_notifier(
    settings: &NotifierSettings,
    environment: Environment,
) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    let timeout = Duration::from_secs(settings.timeout_secs);

    let notifier: Arc<dyn Notifier> = match settings.provider.as_str() {
        "smsc" => Arc::new(SmscNotifier::new(settings.smsc.clone(), timeout)?),
        "noop" => Arc::new(NoopNotifier::new()),
        other => {
            tracing::warn!(
                "Unknown notifier provider '{}', using noop implementation",
                other
            );
            Arc::new(NoopNotifier::new())
        }
    };

    if environment.is_production() && notifier.provider_name() == "noop" {
        tracing::warn!("Noop notifier active in production: codes will not be delivered");
    }

    tracing::info!(provider = notifier.provider_name(), "Notifier selected");
    Ok(notifier)
}

//! # Infrastructure Layer
//!
//! Concrete implementations of the capabilities the OTP core consumes.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Storage**: the in-process [`SecretStore`](otp_core::SecretStore) backend
//! - **Notifier**: delivery providers (SMSC HTTP gateway, no-op)

/// Storage module - secret store backends
pub mod storage;

/// Notifier module - delivery providers
pub mod notifier;

pub use notifier::{create_notifier, NoopNotifier, SmscNotifier};
pub use storage::InMemorySecretStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

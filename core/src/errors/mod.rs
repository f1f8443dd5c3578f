//! Domain error types for the OTP lifecycle.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the OTP service to its caller
///
/// None of these are retried inside the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// A code was sent to this identity too recently
    #[error("Too many requests. Retry in {} seconds", retry_after_secs(.wait))]
    RateLimited { wait: Duration },

    /// A fresh secret could not be produced
    #[error("Secret derivation failed: {message}")]
    SecretDerivationFailed { message: String },

    /// The notifier failed or timed out; store mutations are kept
    #[error("Code dispatch failed: {message}")]
    DispatchFailed { message: String },

    /// The submitted code is not valid for this identity
    #[error("Invalid verification code")]
    Unverified,

    /// The secret store reported a failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A stored secret cannot be used with the configured parameters
    #[error("Code computation failed: {message}")]
    CodeComputation { message: String },

    /// Code parameters rejected at startup
    #[error("Invalid code parameters: {message}")]
    InvalidParameters { message: String },
}

impl OtpError {
    /// Seconds a rate-limited caller has to wait, rounded up
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            OtpError::RateLimited { wait } => Some(retry_after_secs(wait)),
            _ => None,
        }
    }
}

/// Round a wait up to whole seconds so a client never retries too early
fn retry_after_secs(wait: &Duration) -> u64 {
    let secs = wait.as_secs();
    if wait.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

//! # OTP Core
//!
//! Core business logic for phone-bound one-time codes.
//! This crate contains the secret entity and code parameters, the secret store
//! interface, the OTP service and the error types it reports.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{CodeParameters, Digits, HashAlgorithm, Secret};
pub use errors::{OtpError, OtpResult};
pub use repositories::SecretStore;
pub use services::*;

//! Shared utilities and common types for the OTP service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error response structure
//! - Utility functions (phone validation and masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LogFormat, LoggingConfig, NotifierSettings, OtpSettings,
    ServerConfig, SmscSettings,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::phone;

//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `notifier` - SMS delivery provider selection and credentials
//! - `otp` - Code parameters and send interval
//! - `server` - HTTP bind address and IP allow-list
//!
//! Every section is read once at startup and never mutated afterwards.
//! Each `from_lookup` constructor takes a key lookup function so the parsing
//! can be exercised without touching the process environment.

pub mod environment;
pub mod notifier;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notifier::{NotifierSettings, SmscSettings};
pub use otp::OtpSettings;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Code parameters and send interval
    pub otp: OtpSettings,

    /// Delivery provider configuration
    pub notifier: NotifierSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let environment = Environment::from_lookup(lookup);
        Self {
            environment,
            server: ServerConfig::from_lookup(lookup),
            otp: OtpSettings::from_lookup(lookup),
            notifier: NotifierSettings::from_lookup(lookup),
            logging: LoggingConfig::from_lookup(lookup, environment),
        }
    }
}

/// Read a non-empty string value
pub(crate) fn lookup_string(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a value, falling back to the default when missing or malformed
pub(crate) fn lookup_parsed<T: FromStr>(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup_string(lookup, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

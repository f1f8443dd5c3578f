//! Server configuration module

use serde::{Deserialize, Serialize};

use super::lookup_string;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to (`host:port`)
    pub bind_address: String,

    /// IP addresses allowed to call the API; empty allows everyone
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("0.0.0.0:8080"),
            whitelist: vec![],
        }
    }
}

impl ServerConfig {
    /// Read `TOTP_BIND` and `TOTP_WHITELIST`
    ///
    /// A bind value of the form `:8080` is expanded to `0.0.0.0:8080`.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_address = match lookup_string(lookup, "TOTP_BIND") {
            Some(bind) if bind.starts_with(':') => format!("0.0.0.0{}", bind),
            Some(bind) => bind,
            None => defaults.bind_address,
        };

        let whitelist = lookup_string(lookup, "TOTP_WHITELIST")
            .map(|list| {
                list.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            bind_address,
            whitelist,
        }
    }
}

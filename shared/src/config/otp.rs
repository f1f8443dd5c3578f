//! One-time code configuration

use serde::{Deserialize, Serialize};

use super::{lookup_parsed, lookup_string};

/// Raw code settings as read from the environment
///
/// These values are validated when the core service configuration is built
/// from them; this type only carries what the operator supplied.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpSettings {
    /// Minimum seconds between two code dispatches to one phone
    pub interval_secs: u64,

    /// Length of one time step in seconds
    pub period_secs: u64,

    /// Number of digits in a code
    pub digits: u32,

    /// HMAC variant name (SHA1, SHA256, SHA512)
    pub algorithm: String,

    /// Accepted clock skew in steps
    pub skew: u32,

    /// Issuer label attached to new secrets
    pub issuer: String,

    /// When the send window is consumed: `reserve` (before dispatch) or `commit` (after)
    pub send_policy: String,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            interval_secs: 30,
            period_secs: 60,
            digits: 6,
            algorithm: String::from("SHA1"),
            skew: 0,
            issuer: String::from("TOTPService"),
            send_policy: String::from("reserve"),
        }
    }
}

impl OtpSettings {
    /// Read the `TOTP_*` variables, keeping defaults for missing or malformed values
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            interval_secs: lookup_parsed(lookup, "TOTP_INTERVAL", defaults.interval_secs),
            period_secs: lookup_parsed(lookup, "TOTP_PERIOD", defaults.period_secs),
            digits: lookup_parsed(lookup, "TOTP_DIGITS", defaults.digits),
            algorithm: lookup_string(lookup, "TOTP_ALGO")
                .map(|v| v.to_uppercase())
                .unwrap_or(defaults.algorithm),
            skew: lookup_parsed(lookup, "TOTP_SKEW", defaults.skew),
            issuer: lookup_string(lookup, "TOTP_ISSUER").unwrap_or(defaults.issuer),
            send_policy: lookup_string(lookup, "TOTP_SEND_POLICY")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.send_policy),
        }
    }
}

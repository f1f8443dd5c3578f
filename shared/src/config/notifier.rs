//! Delivery provider configuration

use serde::{Deserialize, Serialize};

use super::{lookup_parsed, lookup_string};

/// Default SMSC HTTP endpoint
pub const DEFAULT_SMSC_ENDPOINT: &str = "https://smsc.ru/sys/send.php";

/// Notifier selection and shared dispatch settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierSettings {
    /// Provider name ("noop", "smsc")
    pub provider: String,

    /// Upper bound for a single dispatch, in seconds
    pub timeout_secs: u64,

    /// SMSC gateway credentials
    pub smsc: SmscSettings,
}

/// SMSC gateway settings
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct SmscSettings {
    /// Account login
    pub login: String,
    /// Account password
    pub password: String,
    /// Text placed in front of the code in the message body
    pub prefix: String,
    /// Gateway endpoint
    pub endpoint: String,
}

impl std::fmt::Debug for SmscSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmscSettings")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            provider: String::from("noop"),
            timeout_secs: 10,
            smsc: SmscSettings {
                endpoint: DEFAULT_SMSC_ENDPOINT.to_string(),
                ..Default::default()
            },
        }
    }
}

impl NotifierSettings {
    /// Read `NOTIFIER_*` and `SMSC_*` variables
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            provider: lookup_string(lookup, "NOTIFIER_PROVIDER")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.provider),
            timeout_secs: lookup_parsed(lookup, "NOTIFIER_TIMEOUT_SECS", defaults.timeout_secs),
            smsc: SmscSettings {
                login: lookup_string(lookup, "SMSC_LOGIN").unwrap_or_default(),
                password: lookup_string(lookup, "SMSC_PASSWORD").unwrap_or_default(),
                prefix: lookup("SMSC_PREFIX").unwrap_or_default(),
                endpoint: lookup_string(lookup, "SMSC_ENDPOINT").unwrap_or(defaults.smsc.endpoint),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::lookup_from;

    #[test]
    fn test_defaults() {
        let settings = NotifierSettings::from_lookup(&lookup_from(&[]));

        assert_eq!(settings.provider, "noop");
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.smsc.endpoint, DEFAULT_SMSC_ENDPOINT);
    }

    #[test]
    fn test_prefix_keeps_trailing_space() {
        let lookup = lookup_from(&[
            ("NOTIFIER_PROVIDER", "SMSC"),
            ("SMSC_LOGIN", "acme"),
            ("SMSC_PASSWORD", "hunter2"),
            ("SMSC_PREFIX", "Your code: "),
        ]);
        let settings = NotifierSettings::from_lookup(&lookup);

        assert_eq!(settings.provider, "smsc");
        assert_eq!(settings.smsc.prefix, "Your code: ");
        assert!(!format!("{:?}", settings.smsc).contains("hunter2"));
    }
}

//! Configuration for the OTP service

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use otp_shared::config::OtpSettings;

use crate::domain::value_objects::code_parameters::{CodeParameters, Digits, HashAlgorithm};
use crate::errors::{OtpError, OtpResult};

/// Default bound on a single notifier call
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// When an issuance consumes the identity's send window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendWindowPolicy {
    /// Record the send time before dispatch; a failed dispatch still
    /// consumes the window
    #[default]
    ReserveBeforeDispatch,
    /// Record the send time only once the notifier accepted the code
    CommitAfterDispatch,
}

impl fmt::Display for SendWindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendWindowPolicy::ReserveBeforeDispatch => write!(f, "reserve"),
            SendWindowPolicy::CommitAfterDispatch => write!(f, "commit"),
        }
    }
}

impl FromStr for SendWindowPolicy {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reserve" => Ok(SendWindowPolicy::ReserveBeforeDispatch),
            "commit" => Ok(SendWindowPolicy::CommitAfterDispatch),
            other => Err(OtpError::InvalidParameters {
                message: format!("unknown send policy: {} (expected reserve or commit)", other),
            }),
        }
    }
}

/// Process-wide OTP service configuration, immutable once built
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Code computation parameters
    pub code: CodeParameters,
    /// Minimum time between two sends to one identity
    pub send_interval: Duration,
    /// Issuer label recorded on new secrets
    pub issuer: String,
    /// Upper bound on a notifier call
    pub dispatch_timeout: Duration,
    /// Send window consumption policy
    pub send_policy: SendWindowPolicy,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code: CodeParameters::default(),
            send_interval: Duration::from_secs(30),
            issuer: "TOTPService".to_string(),
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
            send_policy: SendWindowPolicy::default(),
        }
    }
}

impl OtpServiceConfig {
    /// Validate raw settings into a service configuration
    ///
    /// An unknown hash algorithm falls back to SHA1 with a warning. A digit
    /// count other than 6 or 8, a zero period or an unknown send policy is
    /// rejected.
    pub fn from_settings(settings: &OtpSettings, dispatch_timeout: Duration) -> OtpResult<Self> {
        let algorithm = settings
            .algorithm
            .parse::<HashAlgorithm>()
            .unwrap_or_else(|_| {
                tracing::warn!(
                    algorithm = %settings.algorithm,
                    "Unknown TOTP algorithm, falling back to SHA1"
                );
                HashAlgorithm::Sha1
            });
        let digits = Digits::try_from(settings.digits)?;
        let code = CodeParameters::new(settings.period_secs, digits, algorithm, settings.skew)?;
        let send_policy = settings.send_policy.parse::<SendWindowPolicy>()?;

        Ok(Self {
            code,
            send_interval: Duration::from_secs(settings.interval_secs),
            issuer: settings.issuer.clone(),
            dispatch_timeout,
            send_policy,
        })
    }
}

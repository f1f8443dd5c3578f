//! Process-wide parameters for one-time code computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{OtpError, OtpResult};

/// HMAC variant used for code derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub(crate) fn to_totp(self) -> totp_rs::Algorithm {
        match self {
            HashAlgorithm::Sha1 => totp_rs::Algorithm::SHA1,
            HashAlgorithm::Sha256 => totp_rs::Algorithm::SHA256,
            HashAlgorithm::Sha512 => totp_rs::Algorithm::SHA512,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "SHA1"),
            HashAlgorithm::Sha256 => write!(f, "SHA256"),
            HashAlgorithm::Sha512 => write!(f, "SHA512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            other => Err(OtpError::InvalidParameters {
                message: format!("unsupported hash algorithm: {}", other),
            }),
        }
    }
}

/// Number of digits in a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Digits {
    #[default]
    Six,
    Eight,
}

impl Digits {
    /// Code length in characters
    pub fn len(self) -> usize {
        match self {
            Digits::Six => 6,
            Digits::Eight => 8,
        }
    }
}

impl TryFrom<u32> for Digits {
    type Error = OtpError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Digits::Six),
            8 => Ok(Digits::Eight),
            other => Err(OtpError::InvalidParameters {
                message: format!("code length must be 6 or 8 digits, got {}", other),
            }),
        }
    }
}

/// Largest accepted skew, in steps on each side of the current one
pub const MAX_SKEW: u32 = 10;

/// Parameters shared by every code computation and validation in the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeParameters {
    period_secs: u64,
    digits: Digits,
    algorithm: HashAlgorithm,
    skew: u32,
}

impl CodeParameters {
    /// Validate and build code parameters
    ///
    /// A zero period is rejected since every step index divides by it. Skew
    /// is capped at [`MAX_SKEW`].
    pub fn new(
        period_secs: u64,
        digits: Digits,
        algorithm: HashAlgorithm,
        skew: u32,
    ) -> OtpResult<Self> {
        if period_secs == 0 {
            return Err(OtpError::InvalidParameters {
                message: "time step period must be at least one second".to_string(),
            });
        }

        if skew > MAX_SKEW {
            return Err(OtpError::InvalidParameters {
                message: format!("skew must be at most {} steps, got {}", MAX_SKEW, skew),
            });
        }

        Ok(Self {
            period_secs,
            digits,
            algorithm,
            skew,
        })
    }

    pub fn period_secs(&self) -> u64 {
        self.period_secs
    }

    pub fn digits(&self) -> Digits {
        self.digits
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn skew(&self) -> u32 {
        self.skew
    }

    /// Index of the time step containing `time`, `floor(unix_seconds / period)`
    ///
    /// Times before the Unix epoch map to step 0.
    pub fn step_index(&self, time: DateTime<Utc>) -> u64 {
        unix_seconds(time) / self.period_secs
    }

    /// First second of the given step
    pub fn step_start(&self, step: u64) -> u64 {
        step.saturating_mul(self.period_secs)
    }
}

impl Default for CodeParameters {
    fn default() -> Self {
        Self {
            period_secs: 60,
            digits: Digits::Six,
            algorithm: HashAlgorithm::Sha1,
            skew: 0,
        }
    }
}

pub(crate) fn unix_seconds(time: DateTime<Utc>) -> u64 {
    u64::try_from(time.timestamp()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("sha1".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha1));
        assert_eq!("SHA-256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!(" Sha512 ".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha512));
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_digits_conversion() {
        assert_eq!(Digits::try_from(6), Ok(Digits::Six));
        assert_eq!(Digits::try_from(8).map(Digits::len), Ok(8));
        assert!(Digits::try_from(7).is_err());
    }

    #[test]
    fn test_zero_period_rejected() {
        let result = CodeParameters::new(0, Digits::Six, HashAlgorithm::Sha1, 0);
        assert!(matches!(result, Err(OtpError::InvalidParameters { .. })));
    }

    #[test]
    fn test_skew_bounded() {
        assert!(CodeParameters::new(30, Digits::Six, HashAlgorithm::Sha1, MAX_SKEW).is_ok());

        for skew in [MAX_SKEW + 1, 2_000_000, u32::MAX] {
            let result = CodeParameters::new(30, Digits::Six, HashAlgorithm::Sha1, skew);
            assert!(
                matches!(result, Err(OtpError::InvalidParameters { .. })),
                "skew {}",
                skew
            );
        }
    }

    #[test]
    fn test_step_index() {
        let params = CodeParameters::new(30, Digits::Six, HashAlgorithm::Sha1, 1).unwrap();

        let t = Utc.timestamp_opt(59, 0).unwrap();
        assert_eq!(params.step_index(t), 1);

        let t = Utc.timestamp_opt(60, 0).unwrap();
        assert_eq!(params.step_index(t), 2);
        assert_eq!(params.step_start(2), 60);

        let before_epoch = Utc.timestamp_opt(-100, 0).unwrap();
        assert_eq!(params.step_index(before_epoch), 0);
    }
}

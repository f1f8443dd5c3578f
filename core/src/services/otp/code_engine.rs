//! Stateless secret derivation, code computation and code validation
//!
//! HMAC code derivation itself is delegated to `totp-rs`; this module decides
//! which time steps are computed and how submitted codes are compared.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use totp_rs::TOTP;

use crate::domain::entities::secret::{Secret, SECRET_BYTES};
use crate::domain::value_objects::code_parameters::CodeParameters;
use crate::errors::{OtpError, OtpResult};

/// Code derivation and validation primitives
pub struct CodeEngine;

impl CodeEngine {
    /// Derive a fresh random secret for an identity
    ///
    /// Uses OsRng (OS-provided CSPRNG). The store is neither consulted nor
    /// modified.
    pub fn derive_secret(issuer: &str, identity: &str, now: DateTime<Utc>) -> OtpResult<Secret> {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| OtpError::SecretDerivationFailed {
                message: format!("OS random source unavailable: {}", e),
            })?;

        Ok(Secret::from_bytes(&bytes, issuer, identity, now))
    }

    /// Compute the code for the time step containing `time`
    ///
    /// Deterministic in the secret, `floor(time / period)`, the digit count and
    /// the hash algorithm.
    pub fn compute_code(
        secret: &Secret,
        time: DateTime<Utc>,
        params: &CodeParameters,
    ) -> OtpResult<String> {
        let totp = Self::build(secret, params)?;
        let step = params.step_index(time);
        Ok(totp.generate(params.step_start(step)))
    }

    /// Check a submitted code against every step in `[current - skew, current + skew]`
    ///
    /// All candidate steps are compared in constant time, and the loop does not
    /// exit early on a match. Malformed input or an unusable secret yields
    /// `false`.
    pub fn validate_code(
        code: &str,
        secret: &Secret,
        time: DateTime<Utc>,
        params: &CodeParameters,
    ) -> bool {
        if code.len() != params.digits().len() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }

        let totp = match Self::build(secret, params) {
            Ok(totp) => totp,
            Err(e) => {
                tracing::warn!(error = %e, "Stored secret cannot be used for validation");
                return false;
            }
        };

        let current = params.step_index(time);
        let skew = u64::from(params.skew());
        let first = current.saturating_sub(skew);
        let last = current.saturating_add(skew);

        let mut matched = false;
        for step in first..=last {
            let candidate = totp.generate(params.step_start(step));
            matched |= constant_time_eq(candidate.as_bytes(), code.as_bytes());
        }
        matched
    }

    fn build(secret: &Secret, params: &CodeParameters) -> OtpResult<TOTP> {
        let key = totp_rs::Secret::Encoded(secret.encoded().to_string())
            .to_bytes()
            .map_err(|e| OtpError::CodeComputation {
                message: format!("secret is not valid base32: {:?}", e),
            })?;

        // Skew handling lives in validate_code, so the primitive gets 0.
        TOTP::new(
            params.algorithm().to_totp(),
            params.digits().len(),
            0,
            params.period_secs(),
            key,
        )
        .map_err(|e| OtpError::CodeComputation {
            message: e.to_string(),
        })
    }
}

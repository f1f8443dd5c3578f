//! OTP orchestration over a secret store and a notifier

use std::sync::Arc;

use otp_shared::phone::mask_phone_number;

use crate::domain::entities::secret::Secret;
use crate::errors::{OtpError, OtpResult};
use crate::repositories::SecretStore;

use super::clock::{Clock, SystemClock};
use super::code_engine::CodeEngine;
use super::config::{OtpServiceConfig, SendWindowPolicy};
use super::locks::IdentityLocks;
use super::rate_limit::{RateLimiter, SendDecision};
use super::traits::Notifier;
use super::types::IssuedCode;

/// Phone-bound one-time code service
///
/// Every issuance for one identity runs under that identity's lock, from the
/// secret lookup through the notifier call. The lock is held across dispatch
/// so no second code can be computed or sent while one is in flight; the
/// dispatch itself is bounded by `dispatch_timeout`. Verification and send
/// checks never take the lock.
pub struct OtpService<S: SecretStore + ?Sized, N: Notifier + ?Sized> {
    store: Arc<S>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
    config: OtpServiceConfig,
    limiter: RateLimiter,
    locks: IdentityLocks,
}

impl<S: SecretStore + ?Sized, N: Notifier + ?Sized> OtpService<S, N> {
    /// Create a service using the system clock
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: OtpServiceConfig) -> Self {
        Self::with_clock(store, notifier, config, Arc::new(SystemClock))
    }

    /// Create a service reading time from `clock`
    pub fn with_clock(
        store: Arc<S>,
        notifier: Arc<N>,
        config: OtpServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let limiter = RateLimiter::new(config.send_interval);
        Self {
            store,
            notifier,
            clock,
            config,
            limiter,
            locks: IdentityLocks::new(),
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Check whether a code may be sent to `identity` now
    ///
    /// Read-only: nothing is reserved. Use [`send_code`](Self::send_code) to
    /// check and issue atomically.
    pub async fn can_send(&self, identity: &str) -> OtpResult<SendDecision> {
        let last_send = self.store.get_last_send(identity).await?;
        Ok(self.limiter.evaluate(last_send, self.clock.now()))
    }

    /// Issue a code to `identity` without checking the send window
    ///
    /// Creates the identity's secret on first use, records the send time
    /// according to the configured policy, computes the current code and
    /// hands it to the notifier. On dispatch failure the code is not
    /// returned and no store mutation is rolled back.
    pub async fn issue_code(&self, identity: &str) -> OtpResult<IssuedCode> {
        let _guard = self.locks.acquire(identity).await;
        self.issue_locked(identity).await
    }

    /// Check the send window and issue a code as one step
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - Code computed and accepted by the notifier
    /// * `Err(OtpError::RateLimited)` - A code was sent too recently
    /// * `Err(OtpError)` - Secret derivation, storage or dispatch failure
    pub async fn send_code(&self, identity: &str) -> OtpResult<IssuedCode> {
        let _guard = self.locks.acquire(identity).await;

        let decision = self.can_send(identity).await?;
        if !decision.allowed {
            tracing::info!(
                phone = %mask_phone_number(identity),
                wait_ms = decision.wait.as_millis() as u64,
                event = "otp_rate_limited",
                "Code request rejected by send interval"
            );
            return Err(OtpError::RateLimited {
                wait: decision.wait,
            });
        }

        self.issue_locked(identity).await
    }

    /// Check a submitted code for `identity`
    ///
    /// Fails closed: an identity without a secret, a mismatching code and a
    /// storage failure all yield `false`. Nothing is mutated, so a valid
    /// code stays valid for its whole window.
    pub async fn verify_code(&self, identity: &str, code: &str) -> bool {
        let secret = match self.store.get_secret(identity).await {
            Ok(Some(secret)) => secret,
            Ok(None) => {
                tracing::debug!(
                    phone = %mask_phone_number(identity),
                    "Verification for identity without secret"
                );
                return false;
            }
            Err(e) => {
                tracing::error!(
                    phone = %mask_phone_number(identity),
                    error = %e,
                    "Secret lookup failed during verification"
                );
                return false;
            }
        };

        let valid = CodeEngine::validate_code(code, &secret, self.clock.now(), &self.config.code);
        tracing::info!(
            phone = %mask_phone_number(identity),
            valid = valid,
            event = "otp_verified",
            "Verification code checked"
        );
        valid
    }

    /// Replace the secret of `identity` with a fresh one
    ///
    /// Codes issued under the previous secret stop validating. Never called
    /// by the service itself.
    pub async fn rotate_secret(&self, identity: &str) -> OtpResult<()> {
        let _guard = self.locks.acquire(identity).await;

        let secret = CodeEngine::derive_secret(&self.config.issuer, identity, self.clock.now())?;
        self.store.save_secret(identity, secret).await?;

        tracing::info!(
            phone = %mask_phone_number(identity),
            event = "otp_secret_rotated",
            "Secret rotated"
        );
        Ok(())
    }

    /// Issuance body; the caller holds the identity lock
    async fn issue_locked(&self, identity: &str) -> OtpResult<IssuedCode> {
        let now = self.clock.now();
        let secret = self.ensure_secret(identity).await?;

        if self.config.send_policy == SendWindowPolicy::ReserveBeforeDispatch {
            self.store.save_last_send(identity, now).await?;
        }

        let code = CodeEngine::compute_code(&secret, now, &self.config.code)?;
        tracing::debug!(phone = %mask_phone_number(identity), code = %code, "Code computed");

        let delivery_id = self.dispatch(identity, &code).await?;

        if self.config.send_policy == SendWindowPolicy::CommitAfterDispatch {
            self.store.save_last_send(identity, now).await?;
        }

        tracing::info!(
            phone = %mask_phone_number(identity),
            delivery_id = %delivery_id,
            event = "otp_sent",
            "Verification code dispatched"
        );

        let interval = chrono::Duration::from_std(self.config.send_interval)
            .unwrap_or_else(|_| chrono::Duration::zero());
        Ok(IssuedCode {
            code,
            delivery_id,
            issued_at: now,
            next_send_at: now + interval,
        })
    }

    async fn ensure_secret(&self, identity: &str) -> OtpResult<Secret> {
        if let Some(secret) = self.store.get_secret(identity).await? {
            return Ok(secret);
        }

        let secret = CodeEngine::derive_secret(&self.config.issuer, identity, self.clock.now())?;
        self.store.save_secret(identity, secret.clone()).await?;

        tracing::info!(
            phone = %mask_phone_number(identity),
            issuer = %self.config.issuer,
            event = "otp_secret_created",
            "Created secret for new identity"
        );
        Ok(secret)
    }

    async fn dispatch(&self, identity: &str, code: &str) -> OtpResult<String> {
        let timeout = self.config.dispatch_timeout;
        match tokio::time::timeout(timeout, self.notifier.send(identity, code)).await {
            Ok(Ok(delivery_id)) => Ok(delivery_id),
            Ok(Err(message)) => {
                tracing::error!(
                    phone = %mask_phone_number(identity),
                    provider = self.notifier.provider_name(),
                    error = %message,
                    event = "otp_dispatch_failed",
                    "Notifier rejected the code"
                );
                Err(OtpError::DispatchFailed { message })
            }
            Err(_) => {
                tracing::error!(
                    phone = %mask_phone_number(identity),
                    provider = self.notifier.provider_name(),
                    timeout_ms = timeout.as_millis() as u64,
                    event = "otp_dispatch_timeout",
                    "Notifier call timed out"
                );
                Err(OtpError::DispatchFailed {
                    message: format!("notifier timed out after {}ms", timeout.as_millis()),
                })
            }
        }
    }
}

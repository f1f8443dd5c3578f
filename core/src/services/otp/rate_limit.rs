//! Minimum-interval send limiter

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Outcome of a send-window check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendDecision {
    /// Whether a code may be sent now
    pub allowed: bool,
    /// Remaining time until the window opens, zero when allowed
    pub wait: Duration,
}

impl SendDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            wait: Duration::ZERO,
        }
    }

    pub fn deny(wait: Duration) -> Self {
        Self {
            allowed: false,
            wait,
        }
    }
}

/// Pure evaluation of the per-identity send window
///
/// Query only: the limiter never reserves or mutates anything. Serialising the
/// check with the issuance that follows is the OTP service's job.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    interval: Duration,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Decide whether a send is allowed at `now` given the last send time
    ///
    /// A last send in the future (clock moved backwards) counts as zero
    /// elapsed time.
    pub fn evaluate(&self, last_send: Option<DateTime<Utc>>, now: DateTime<Utc>) -> SendDecision {
        let Some(last_send) = last_send else {
            return SendDecision::allow();
        };

        let elapsed = (now - last_send).to_std().unwrap_or(Duration::ZERO);
        if elapsed >= self.interval {
            SendDecision::allow()
        } else {
            SendDecision::deny(self.interval - elapsed)
        }
    }
}

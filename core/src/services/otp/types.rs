//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of a successful code issuance
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The code handed to the notifier
    pub code: String,
    /// Delivery identifier returned by the notifier
    pub delivery_id: String,
    /// Time the code was computed for
    pub issued_at: DateTime<Utc>,
    /// Earliest time another code may be sent to this identity
    pub next_send_at: DateTime<Utc>,
}

//! Secret store trait defining per-identity persistence.
//!
//! The store holds, per identity, the shared secret and the timestamp of the
//! last code issuance. It carries no business logic: the OTP service decides
//! when secrets are created and when the send window is consumed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::secret::Secret;
use crate::errors::OtpResult;

/// Key-value persistence for secrets and last-send timestamps
///
/// Every operation must be atomic on its own and safe under concurrent access
/// for both different identities and the same identity. Composing several
/// operations atomically is the caller's concern.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use chrono::{DateTime, Utc};
/// use otp_core::domain::entities::secret::Secret;
/// use otp_core::errors::OtpResult;
/// use otp_core::repositories::SecretStore;
///
/// struct RemoteSecretStore {
///     // connection handle
/// }
///
/// #[async_trait]
/// impl SecretStore for RemoteSecretStore {
///     async fn get_secret(&self, identity: &str) -> OtpResult<Option<Secret>> {
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn save_secret(&self, _: &str, _: Secret) -> OtpResult<()> { Ok(()) }
/// #   async fn get_last_send(&self, _: &str) -> OtpResult<Option<DateTime<Utc>>> { Ok(None) }
/// #   async fn save_last_send(&self, _: &str, _: DateTime<Utc>) -> OtpResult<()> { Ok(()) }
/// }
/// ```
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret of an identity
    ///
    /// # Returns
    /// * `Ok(Some(Secret))` - The identity has issued a code before
    /// * `Ok(None)` - The identity never issued a code
    /// * `Err(OtpError::Storage)` - The backend failed
    async fn get_secret(&self, identity: &str) -> OtpResult<Option<Secret>>;

    /// Store the secret of an identity, overwriting any previous one
    async fn save_secret(&self, identity: &str, secret: Secret) -> OtpResult<()>;

    /// Fetch the time of the last code issuance for an identity
    async fn get_last_send(&self, identity: &str) -> OtpResult<Option<DateTime<Utc>>>;

    /// Record the time of a code issuance, overwriting any previous one
    async fn save_last_send(&self, identity: &str, timestamp: DateTime<Utc>) -> OtpResult<()>;
}

//! Shared secret entity bound to one identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes in a freshly derived secret (160 bits)
pub const SECRET_BYTES: usize = 20;

/// Identity-scoped shared secret used for code computation
///
/// The key material is kept base32 encoded (RFC 4648, no padding), the
/// representation authenticator apps and provisioning URIs use. Issuer and
/// account name are metadata recorded at derivation time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Base32-encoded key material
    encoded: String,

    /// Issuer label at derivation time
    issuer: String,

    /// Identity the secret was derived for
    account: String,

    /// When the secret was derived
    created_at: DateTime<Utc>,
}

impl Secret {
    /// Wrap already base32-encoded key material
    pub fn new(
        encoded: impl Into<String>,
        issuer: impl Into<String>,
        account: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            encoded: encoded.into(),
            issuer: issuer.into(),
            account: account.into(),
            created_at,
        }
    }

    /// Build a secret from raw key bytes
    pub fn from_bytes(
        bytes: &[u8],
        issuer: impl Into<String>,
        account: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let encoded = totp_rs::Secret::Raw(bytes.to_vec()).to_encoded().to_string();
        Self::new(encoded, issuer, account, created_at)
    }

    /// Base32-encoded key material
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// Key material never reaches logs through Debug
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("encoded", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("account", &self.account)
            .field("created_at", &self.created_at)
            .finish()
    }
}

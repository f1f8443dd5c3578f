//! In-memory secret store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use otp_core::domain::entities::secret::Secret;
use otp_core::errors::OtpResult;
use otp_core::repositories::SecretStore;

/// Concurrency-safe in-process store
///
/// Each operation takes the map lock for its own duration only, so single
/// reads and writes are atomic. Entries are never evicted: memory grows with
/// the number of distinct identities.
#[derive(Clone, Default)]
pub struct InMemorySecretStore {
    secrets: Arc<RwLock<HashMap<String, Secret>>>,
    last_send: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities holding a secret
    pub async fn identity_count(&self) -> usize {
        self.secrets.read().await.len()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get_secret(&self, identity: &str) -> OtpResult<Option<Secret>> {
        Ok(self.secrets.read().await.get(identity).cloned())
    }

    async fn save_secret(&self, identity: &str, secret: Secret) -> OtpResult<()> {
        self.secrets
            .write()
            .await
            .insert(identity.to_string(), secret);
        Ok(())
    }

    async fn get_last_send(&self, identity: &str) -> OtpResult<Option<DateTime<Utc>>> {
        Ok(self.last_send.read().await.get(identity).copied())
    }

    async fn save_last_send(&self, identity: &str, timestamp: DateTime<Utc>) -> OtpResult<()> {
        self.last_send
            .write()
            .await
            .insert(identity.to_string(), timestamp);
        Ok(())
    }
}

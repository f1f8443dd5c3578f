//! Mock implementation of SecretStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::secret::Secret;
use crate::errors::{OtpError, OtpResult};

use super::trait_::SecretStore;

/// Mock secret store recording writes and able to simulate backend failures
pub struct MockSecretStore {
    secrets: Arc<RwLock<HashMap<String, Secret>>>,
    last_send: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    secret_writes: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockSecretStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            secrets: Arc::new(RwLock::new(HashMap::new())),
            last_send: Arc::new(RwLock::new(HashMap::new())),
            secret_writes: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent operation fail
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `save_secret` calls so far
    pub fn secret_writes(&self) -> usize {
        self.secret_writes.load(Ordering::SeqCst)
    }

    /// Seed a last-send timestamp directly
    pub async fn seed_last_send(&self, identity: &str, timestamp: DateTime<Utc>) {
        self.last_send
            .write()
            .await
            .insert(identity.to_string(), timestamp);
    }

    fn check(&self) -> OtpResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(OtpError::Storage {
                message: "Mock store failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn get_secret(&self, identity: &str) -> OtpResult<Option<Secret>> {
        self.check()?;
        Ok(self.secrets.read().await.get(identity).cloned())
    }

    async fn save_secret(&self, identity: &str, secret: Secret) -> OtpResult<()> {
        self.check()?;
        self.secret_writes.fetch_add(1, Ordering::SeqCst);
        self.secrets
            .write()
            .await
            .insert(identity.to_string(), secret);
        Ok(())
    }

    async fn get_last_send(&self, identity: &str) -> OtpResult<Option<DateTime<Utc>>> {
        self.check()?;
        Ok(self.last_send.read().await.get(identity).copied())
    }

    async fn save_last_send(&self, identity: &str, timestamp: DateTime<Utc>) -> OtpResult<()> {
        self.check()?;
        self.last_send
            .write()
            .await
            .insert(identity.to_string(), timestamp);
        Ok(())
    }
}

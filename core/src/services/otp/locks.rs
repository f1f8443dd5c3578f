//! Per-identity lock table
//!
//! Every identity gets its own async mutex, created on demand and dropped
//! again once nobody holds or waits for it. Different identities never
//! contend with each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockTable = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Keyed lock table serialising work per identity
#[derive(Default)]
pub struct IdentityLocks {
    table: LockTable,
}

impl IdentityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `identity`
    pub async fn acquire(&self, identity: &str) -> IdentityGuard {
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            table
                .entry(identity.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = lock.lock_owned().await;
        IdentityGuard {
            identity: identity.to_string(),
            guard: Some(guard),
            table: Arc::clone(&self.table),
        }
    }

    /// Number of identities with a live lock entry
    pub fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive hold on one identity, released on drop
pub struct IdentityGuard {
    identity: String,
    guard: Option<OwnedMutexGuard<()>>,
    table: LockTable,
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the table still references the mutex: no holder, no waiter.
        let idle = table
            .get(&self.identity)
            .map(|lock| Arc::strong_count(lock) == 1)
            .unwrap_or(false);
        if idle {
            table.remove(&self.identity);
        }
    }
}

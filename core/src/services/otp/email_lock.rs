//! Per-email serialization point for lifecycle operations.
//!
//! The store offers no conditional updates, so the read-increment-write on
//! `attempts` and the delete-then-recreate dance behind "at most one active
//! record" are not atomic at the store level. Serializing all lifecycle
//! operations for the same email through one async mutex restores both
//! invariants for every caller that goes through this process.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// How many distinct email entries may accumulate before a sweep of
/// currently-unheld locks runs.
const SWEEP_THRESHOLD: usize = 1024;

/// Registry of per-email async locks.
pub(crate) struct EmailLockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl EmailLockRegistry {
    pub(crate) fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the lock for an email, creating the entry on first use.
    /// The guard is owned so it can be held across await points.
    pub(crate) async fn acquire(&self, email: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.locks.lock().await;
            if locks.len() >= SWEEP_THRESHOLD {
                // An Arc held only by the map belongs to no in-flight request
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks
                .entry(email.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }
}

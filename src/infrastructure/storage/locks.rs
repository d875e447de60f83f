//! Per-entity lock manager.
//!
//! Multi-step mutations (book, settle, cancel, reconcile) stage changes on
//! cloned entities and write back under a lock so no partial state is
//! observable. Lock order is fixed: reservation, then facility, then user.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;

use crate::shared::{DomainError, DomainResult};

/// Held for the duration of a locked transaction.
pub type EntityGuard = OwnedMutexGuard<()>;

/// Keyed mutexes for facilities, users and reservations with a bounded wait.
pub struct LockManager {
    facilities: DashMap<i32, Arc<Mutex<()>>>,
    users: DashMap<i32, Arc<Mutex<()>>>,
    reservations: DashMap<i32, Arc<Mutex<()>>>,
    wait: Duration,
}

impl LockManager {
    pub fn new(wait: Duration) -> Self {
        Self {
            facilities: DashMap::new(),
            users: DashMap::new(),
            reservations: DashMap::new(),
            wait,
        }
    }

    async fn acquire(
        map: &DashMap<i32, Arc<Mutex<()>>>,
        id: i32,
        label: &'static str,
        wait: Duration,
    ) -> DomainResult<EntityGuard> {
        let lock = map.entry(id).or_default().clone();
        timeout(wait, lock.lock_owned())
            .await
            .map_err(|_| DomainError::Busy(label))
    }

    pub async fn lock_facility(&self, id: i32) -> DomainResult<EntityGuard> {
        Self::acquire(&self.facilities, id, "facility", self.wait).await
    }

    pub async fn lock_user(&self, id: i32) -> DomainResult<EntityGuard> {
        Self::acquire(&self.users, id, "user", self.wait).await
    }

    pub async fn lock_reservation(&self, id: i32) -> DomainResult<EntityGuard> {
        Self::acquire(&self.reservations, id, "reservation", self.wait).await
    }
}

impl Default for LockManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn independent_ids_do_not_contend() {
        let locks = LockManager::new(Duration::from_millis(50));
        let _a = locks.lock_facility(1).await.unwrap();
        let _b = locks.lock_facility(2).await.unwrap();
        let _c = locks.lock_user(1).await.unwrap();
    }

    #[tokio::test]
    async fn contended_lock_times_out_with_busy() {
        let locks = LockManager::new(Duration::from_millis(20));
        let _held = locks.lock_facility(7).await.unwrap();
        let err = locks.lock_facility(7).await.unwrap_err();
        assert!(matches!(err, DomainError::Busy("facility")));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn released_lock_can_be_retaken() {
        let locks = LockManager::new(Duration::from_millis(20));
        {
            let _held = locks.lock_reservation(1).await.unwrap();
        }
        let _again = locks.lock_reservation(1).await.unwrap();
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Keyed mutual exclusion for commit critical sections.
///
/// Single-process stand-in for row-level `SELECT ... FOR UPDATE`: every
/// re-check-and-insert sequence serializes through the mutex for its minimal
/// key (`swim:{session}:{date}` or `slot:{turf}:{field}:{sport}:{date}`),
/// never through a global lock.
#[derive(Default)]
pub struct LockManager {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: String) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.locks.lock().unwrap();
            map.entry(key)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn same_key_serializes_critical_sections() {
        let manager = Arc::new(LockManager::new());
        let in_section = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let manager = manager.clone();
            let in_section = in_section.clone();
            handles.push(tokio::spawn(async move {
                let _guard = manager.acquire("swim:1:2025-01-01".to_string()).await;
                assert_eq!(in_section.fetch_add(1, Ordering::SeqCst), 0);
                tokio::task::yield_now().await;
                in_section.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let manager = LockManager::new();
        let _a = manager.acquire("slot:1:1:Cricket:2025-01-01".to_string()).await;
        // A second key must be grantable while the first guard is held.
        let _b = manager.acquire("slot:2:1:Cricket:2025-01-01".to_string()).await;
    }
}

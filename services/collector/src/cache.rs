//! Shared, lock-free-ish pool state cache. Every collector task writes
//! through `try_update`; the scanner reads through `get`. Readers observe a
//! consistent snapshot per pool but no cross-pool consistency, matching the
//! stated concurrency model.

use arb_types::{PoolKey, PoolSnapshot};
use dashmap::DashMap;

#[derive(Default)]
pub struct PoolCache {
    inner: DashMap<PoolKey, PoolSnapshot>,
}

impl PoolCache {
    pub fn new() -> Self {
        PoolCache {
            inner: DashMap::new(),
        }
    }

    /// Writes `snapshot` only if no entry exists yet, or the existing
    /// entry's `observed_at_ns` is strictly older. Returns whether the
    /// write happened.
    pub fn try_update(&self, snapshot: PoolSnapshot) -> bool {
        let key = PoolKey {
            venue: snapshot.venue,
            pool: snapshot.pool,
        };
        match self.inner.entry(key) {
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(snapshot);
                true
            }
            dashmap::mapref::entry::Entry::Occupied(mut slot) => {
                if snapshot.observed_at_ns > slot.get().observed_at_ns {
                    slot.insert(snapshot);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn get(&self, key: &PoolKey) -> Option<PoolSnapshot> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    pub fn iter_snapshot(&self) -> Vec<PoolSnapshot> {
        self.inner.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

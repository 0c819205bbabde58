//! Wall-clock helper shared by every module that stamps or compares
//! `_ns` timestamps (snapshots, heartbeats, cached balances). Centralized
//! here so the collector and engine crates compare against the same clock
//! source rather than each reimplementing the `SystemTime` dance.

use std::time::{SystemTime, UNIX_EPOCH};

pub fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

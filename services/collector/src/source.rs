//! The collector's data-source boundary. A production deployment polls or
//! subscribes to a venue's RPC endpoint; this workspace depends on that
//! only through `PoolSource`, the same boundary-trait pattern the engine
//! uses for `ChainClient`, so `run_collector` can be driven by a real
//! transport or, in tests, a canned fixture.

use crate::cache::PoolCache;
use crate::parsers::{self, RawPoolRead};
use crate::supervisor::Heartbeat;
use arb_types::time::now_ns;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

#[async_trait]
pub trait PoolSource: Send + Sync {
    async fn poll(&self) -> anyhow::Result<Vec<RawPoolRead>>;
}

/// Polls `source` on a fixed interval, parses every read, and writes
/// survivors into `cache`. Beats `heartbeat` after every poll attempt
/// (success or failure) so a source that returns errors, rather than
/// hanging, is still distinguishable from one that has stopped entirely.
pub async fn run_collector(
    name: &str,
    source: Arc<dyn PoolSource>,
    cache: Arc<PoolCache>,
    heartbeat: Arc<Heartbeat>,
    poll_interval_ms: u64,
) -> anyhow::Result<()> {
    loop {
        match source.poll().await {
            Ok(reads) => {
                let mut parsed = 0;
                for raw in &reads {
                    if let Some(snapshot) = parsers::dispatch(raw) {
                        cache.try_update(snapshot);
                        parsed += 1;
                    }
                }
                debug!(collector = name, read = reads.len(), parsed, "poll completed");
            }
            Err(err) => {
                warn!(collector = name, error = %err, "poll failed");
            }
        }
        heartbeat.beat(now_ns());
        tokio::time::sleep(std::time::Duration::from_millis(poll_interval_ms)).await;
    }
}

/// In-memory `PoolSource` used by tests and as the engine's placeholder
/// until a real RPC-backed source is wired in.
pub struct MockPoolSource {
    pub reads: parking_lot::Mutex<Vec<RawPoolRead>>,
}

impl MockPoolSource {
    pub fn new(reads: Vec<RawPoolRead>) -> Self {
        MockPoolSource {
            reads: parking_lot::Mutex::new(reads),
        }
    }

    pub fn empty() -> Self {
        MockPoolSource::new(Vec::new())
    }
}

#[async_trait]
impl PoolSource for MockPoolSource {
    async fn poll(&self) -> anyhow::Result<Vec<RawPoolRead>> {
        Ok(self.reads.lock().clone())
    }
}

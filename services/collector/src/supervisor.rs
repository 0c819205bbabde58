//! Supervises one collector task per venue. Restarts a task with bounded
//! exponential backoff when it exits (crash or closed stream); treats the
//! absence of a heartbeat within the liveness window the same as a crash.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const INITIAL_BACKOFF_MS: u64 = 500;
const MAX_BACKOFF_MS: u64 = 30_000;
const HEARTBEAT_TIMEOUT_SECS: u64 = 10;

/// Shared liveness marker a collector task touches on every successful
/// poll/event. The supervisor compares this against wall-clock time rather
/// than relying on the task's own exit to signal trouble, since a hung
/// task (blocked on an RPC call) never exits on its own.
#[derive(Default)]
pub struct Heartbeat {
    last_beat_ns: AtomicU64,
}

impl Heartbeat {
    pub fn new() -> Arc<Self> {
        Arc::new(Heartbeat::default())
    }

    pub fn beat(&self, now_ns: u64) {
        self.last_beat_ns.store(now_ns, Ordering::SeqCst);
    }

    pub fn is_dead(&self, now_ns: u64) -> bool {
        let last = self.last_beat_ns.load(Ordering::SeqCst);
        now_ns.saturating_sub(last) > HEARTBEAT_TIMEOUT_SECS * 1_000_000_000
    }
}

/// Runs `spawn_task` in a loop, restarting with exponential backoff
/// (capped at `MAX_BACKOFF_MS`) every time the spawned future resolves,
/// since a collector task resolving at all is always unexpected.
pub async fn supervise<F, Fut>(name: &str, mut spawn_task: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<()>>,
{
    let mut backoff_ms = INITIAL_BACKOFF_MS;
    loop {
        info!(collector = name, "starting collector task");
        match spawn_task().await {
            Ok(()) => {
                warn!(collector = name, "collector task exited cleanly, restarting");
            }
            Err(err) => {
                error!(collector = name, error = %err, "collector task failed, restarting");
            }
        }
        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
    }
}

//! Polls gas/collateral balance on a fixed interval and caches the last
//! read so the orchestrator's hot path never blocks on an RPC call per
//! tick.

use parking_lot::RwLock;
use tracing::warn;

const CACHE_DURATION_NS: u64 = 10 * 1_000_000_000;

#[derive(Debug, Clone, Copy)]
struct CachedBalance {
    balance: u64,
    observed_at_ns: u64,
}

pub struct GasMonitor {
    cache: RwLock<Option<CachedBalance>>,
    min_gas_balance: u64,
}

impl GasMonitor {
    pub fn new(min_gas_balance: u64) -> Self {
        GasMonitor {
            cache: RwLock::new(None),
            min_gas_balance,
        }
    }

    pub fn record_balance(&self, balance: u64, now_ns: u64) {
        *self.cache.write() = Some(CachedBalance {
            balance,
            observed_at_ns: now_ns,
        });
    }

    /// `None` means no reading has been taken yet, or the cached reading
    /// has gone stale; the orchestrator treats both as "do not submit."
    pub fn is_sufficient(&self, now_ns: u64) -> Option<bool> {
        let cached = (*self.cache.read())?;
        if now_ns.saturating_sub(cached.observed_at_ns) > CACHE_DURATION_NS {
            warn!("gas balance reading stale, treating as insufficient");
            return None;
        }
        Some(cached.balance >= self.min_gas_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sufficient_balance_reports_true() {
        let gm = GasMonitor::new(100);
        gm.record_balance(200, 0);
        assert_eq!(gm.is_sufficient(0), Some(true));
    }

    #[test]
    fn insufficient_balance_reports_false() {
        let gm = GasMonitor::new(100);
        gm.record_balance(50, 0);
        assert_eq!(gm.is_sufficient(0), Some(false));
    }

    #[test]
    fn no_reading_yet_reports_none() {
        let gm = GasMonitor::new(100);
        assert_eq!(gm.is_sufficient(0), None);
    }

    #[test]
    fn stale_reading_reports_none() {
        let gm = GasMonitor::new(100);
        gm.record_balance(200, 0);
        assert_eq!(gm.is_sufficient(CACHE_DURATION_NS + 1), None);
    }
}

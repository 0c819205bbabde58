//! The scanner's output: a candidate arbitrage opportunity before it has
//! been sized by the optimizer or built into a transaction.

use crate::fixed_point::Amount8;
use crate::ids::PoolKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub strategy_tag: &'static str,
    pub legs: Vec<PoolKey>,
    pub estimated_amount_in: Amount8,
    pub estimated_profit: Amount8,
    pub discovered_at_ns: u64,
}

impl Opportunity {
    pub fn is_stale(&self, now_ns: u64, max_age_ns: u64) -> bool {
        now_ns.saturating_sub(self.discovered_at_ns) > max_age_ns
    }
}

/// Orders opportunities by estimated profit, descending, matching the
/// scanner's "sort by estimated profit" output contract.
pub fn sort_by_estimated_profit_desc(opportunities: &mut [Opportunity]) {
    opportunities.sort_by(|a, b| b.estimated_profit.cmp(&a.estimated_profit));
}

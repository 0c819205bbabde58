//! Pool state as observed by a collector and read by the scanner.

use crate::ids::{AssetId, PoolId, Venue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind-specific reserve/price data. Kept as an enum (rather than an
/// all-fields-optional struct) so the scanner's simulation dispatch can
/// match exhaustively instead of unwrapping `Option`s it assumes are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VenueState {
    Clmm {
        sqrt_price_x64: u128,
        liquidity: u128,
        tick: i32,
        fee_bps: u32,
    },
    Clob {
        best_bid: Decimal,
        best_ask: Decimal,
        bid_depth: Decimal,
        ask_depth: Decimal,
    },
    Weighted {
        reserve_base: Decimal,
        reserve_quote: Decimal,
        weight_base: Decimal,
        weight_quote: Decimal,
        fee_bps: u32,
    },
}

/// A single observation of a pool/market, written by exactly one collector
/// and read by the scanner. `observed_at_ns` is the monotonic write-ordering
/// key enforced by the shared cache (strictly-newer-only overwrites).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub venue: Venue,
    pub pool: PoolId,
    pub base: AssetId,
    pub quote: AssetId,
    pub state: VenueState,
    pub observed_at_ns: u64,
}

impl PoolSnapshot {
    pub fn is_stale(&self, now_ns: u64, max_age_ns: u64) -> bool {
        now_ns.saturating_sub(self.observed_at_ns) > max_age_ns
    }

    pub fn contains_asset(&self, asset: AssetId) -> bool {
        self.base == asset || self.quote == asset
    }
}

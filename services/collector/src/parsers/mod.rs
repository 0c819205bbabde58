//! Pure, I/O-free parsers: one per venue kind. Each tolerates a
//! missing/null/out-of-range field by returning `None` rather than
//! panicking or propagating an error, since a single malformed read must
//! never take down a collector task.

pub mod clmm;
pub mod clob;
pub mod weighted;

use arb_types::{PoolSnapshot, Venue};
use serde::Deserialize;

/// Venue-agnostic raw wire shape. Optional fields model "the venue didn't
/// send it this tick" rather than "the venue never has this field."
#[derive(Debug, Clone, Deserialize)]
pub struct RawPoolRead {
    pub venue: String,
    pub pool_id: u64,
    pub base_asset: u64,
    pub quote_asset: u64,
    pub sqrt_price_x64: Option<String>,
    pub liquidity: Option<String>,
    pub tick: Option<i32>,
    pub fee_bps: Option<u32>,
    pub best_bid: Option<String>,
    pub best_ask: Option<String>,
    pub bid_depth: Option<String>,
    pub ask_depth: Option<String>,
    pub reserve_base: Option<String>,
    pub reserve_quote: Option<String>,
    pub weight_base: Option<String>,
    pub weight_quote: Option<String>,
    pub observed_at_ns: u64,
}

/// Routes a raw read to the parser matching its `venue` tag. Unknown tags
/// return `None`, the same tolerant-drop contract each parser already
/// applies to a single malformed field.
pub fn dispatch(raw: &RawPoolRead) -> Option<PoolSnapshot> {
    match raw.venue.as_str() {
        "clmm_primary" => clmm::parse(raw, Venue::ClmmPrimary),
        "clmm_secondary" => clmm::parse(raw, Venue::ClmmSecondary),
        "clmm_flash_swap" => clmm::parse(raw, Venue::ClmmFlashSwap),
        "clob" => clob::parse(raw),
        "weighted_amm" => weighted::parse(raw),
        _ => None,
    }
}

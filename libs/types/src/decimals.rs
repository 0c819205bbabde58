//! Per-asset decimal counts, used to normalize a venue's raw price (a
//! ratio of raw integer reserves/ticks) into a human-comparable unit
//! before the scanner compares it across venues. Without this, two pools
//! quoting the same asset pair at different raw decimal scales would
//! compare as if the scales matched.

use crate::ids::AssetId;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Assumed decimal count for any asset the map has no entry for.
pub const DEFAULT_ASSET_DECIMALS: u8 = 9;

#[derive(Debug, Clone, Default)]
pub struct DecimalsMap(HashMap<AssetId, u8>);

impl DecimalsMap {
    pub fn new() -> Self {
        DecimalsMap(HashMap::new())
    }

    pub fn insert(&mut self, asset: AssetId, decimals: u8) {
        self.0.insert(asset, decimals);
    }

    pub fn decimals_of(&self, asset: AssetId) -> u8 {
        *self.0.get(&asset).unwrap_or(&DEFAULT_ASSET_DECIMALS)
    }

    /// `human_price = raw_price * 10^(base_decimals - quote_decimals)`.
    /// `raw_price` is the quote-per-base ratio computed directly from a
    /// venue's raw reserves/sqrt-price, i.e. before either asset's decimal
    /// count has been applied.
    pub fn normalize_price(&self, raw_price: Decimal, base: AssetId, quote: AssetId) -> Decimal {
        let diff = self.decimals_of(base) as i32 - self.decimals_of(quote) as i32;
        match diff.cmp(&0) {
            std::cmp::Ordering::Equal => raw_price,
            std::cmp::Ordering::Greater => raw_price * pow10(diff),
            std::cmp::Ordering::Less => raw_price / pow10(-diff),
        }
    }
}

fn pow10(exp: i32) -> Decimal {
    let mut result = Decimal::ONE;
    let ten = Decimal::from(10u64);
    for _ in 0..exp {
        result *= ten;
    }
    result
}

use super::RawPoolRead;
use arb_types::{AssetId, PoolId, PoolSnapshot, Venue, VenueState};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn parse(raw: &RawPoolRead) -> Option<PoolSnapshot> {
    let reserve_base = Decimal::from_str(raw.reserve_base.as_ref()?).ok()?;
    let reserve_quote = Decimal::from_str(raw.reserve_quote.as_ref()?).ok()?;
    let weight_base = Decimal::from_str(raw.weight_base.as_ref()?).ok()?;
    let weight_quote = Decimal::from_str(raw.weight_quote.as_ref()?).ok()?;
    let fee_bps = raw.fee_bps?;

    if reserve_base <= Decimal::ZERO || reserve_quote <= Decimal::ZERO {
        return None;
    }
    if weight_base <= Decimal::ZERO || weight_quote <= Decimal::ZERO {
        return None;
    }

    Some(PoolSnapshot {
        venue: Venue::WeightedAmm,
        pool: PoolId(raw.pool_id),
        base: AssetId(raw.base_asset),
        quote: AssetId(raw.quote_asset),
        state: VenueState::Weighted {
            reserve_base,
            reserve_quote,
            weight_base,
            weight_quote,
            fee_bps,
        },
        observed_at_ns: raw.observed_at_ns,
    })
}

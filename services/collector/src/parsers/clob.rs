use super::RawPoolRead;
use arb_types::{AssetId, PoolId, PoolSnapshot, Venue, VenueState};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn parse(raw: &RawPoolRead) -> Option<PoolSnapshot> {
    let best_bid = Decimal::from_str(raw.best_bid.as_ref()?).ok()?;
    let best_ask = Decimal::from_str(raw.best_ask.as_ref()?).ok()?;
    let bid_depth = Decimal::from_str(raw.bid_depth.as_ref()?).ok()?;
    let ask_depth = Decimal::from_str(raw.ask_depth.as_ref()?).ok()?;

    if best_bid <= Decimal::ZERO || best_ask <= Decimal::ZERO {
        return None;
    }
    if best_bid > best_ask {
        return None;
    }

    Some(PoolSnapshot {
        venue: Venue::Clob,
        pool: PoolId(raw.pool_id),
        base: AssetId(raw.base_asset),
        quote: AssetId(raw.quote_asset),
        state: VenueState::Clob {
            best_bid,
            best_ask,
            bid_depth,
            ask_depth,
        },
        observed_at_ns: raw.observed_at_ns,
    })
}

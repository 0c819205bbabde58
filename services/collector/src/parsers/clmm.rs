use super::RawPoolRead;
use arb_amm::clmm::{MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use arb_types::{AssetId, PoolId, PoolSnapshot, Venue, VenueState};

pub fn parse(raw: &RawPoolRead, venue: Venue) -> Option<PoolSnapshot> {
    let sqrt_price_x64: u128 = raw.sqrt_price_x64.as_ref()?.parse().ok()?;
    let liquidity: u128 = raw.liquidity.as_ref()?.parse().ok()?;
    let tick = raw.tick?;
    let fee_bps = raw.fee_bps?;

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price_x64) {
        return None;
    }
    if liquidity == 0 {
        return None;
    }

    Some(PoolSnapshot {
        venue,
        pool: PoolId(raw.pool_id),
        base: AssetId(raw.base_asset),
        quote: AssetId(raw.quote_asset),
        state: VenueState::Clmm {
            sqrt_price_x64,
            liquidity,
            tick,
            fee_bps,
        },
        observed_at_ns: raw.observed_at_ns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_raw() -> RawPoolRead {
        RawPoolRead {
            venue: "clmm_primary".to_string(),
            pool_id: 1,
            base_asset: 1,
            quote_asset: 2,
            sqrt_price_x64: Some((MAX_SQRT_PRICE / 2).to_string()),
            liquidity: Some("1000000".to_string()),
            tick: Some(0),
            fee_bps: Some(30),
            best_bid: None,
            best_ask: None,
            bid_depth: None,
            ask_depth: None,
            reserve_base: None,
            reserve_quote: None,
            weight_base: None,
            weight_quote: None,
            observed_at_ns: 1,
        }
    }

    #[test]
    fn parses_valid_read() {
        assert!(parse(&base_raw(), Venue::ClmmPrimary).is_some());
    }

    #[test]
    fn missing_sqrt_price_returns_none() {
        let mut raw = base_raw();
        raw.sqrt_price_x64 = None;
        assert!(parse(&raw, Venue::ClmmPrimary).is_none());
    }

    #[test]
    fn out_of_range_price_returns_none() {
        let mut raw = base_raw();
        raw.sqrt_price_x64 = Some((MIN_SQRT_PRICE - 1).to_string());
        assert!(parse(&raw, Venue::ClmmPrimary).is_none());
    }

    #[test]
    fn zero_liquidity_returns_none() {
        let mut raw = base_raw();
        raw.liquidity = Some("0".to_string());
        assert!(parse(&raw, Venue::ClmmPrimary).is_none());
    }
}

//! Wraps `arb_amm::optimizer::ternary_search_max` with a route-level
//! simulation function and the net-profit gate: an opportunity whose
//! optimal size still nets non-positive after estimated gas is rejected
//! outright rather than submitted.

use arb_amm::clmm::{swap_within_tick, ClmmPoolState};
use arb_amm::clob::{sell_into_bid, ClobTopOfBook};
use arb_amm::optimizer::ternary_search_max;
use arb_amm::weighted::{sell_base_for_quote, WeightedPoolState};
use arb_types::VenueState;
use rust_decimal::Decimal;

/// One leg of a route, holding enough state to simulate a sell of its
/// input asset without mutating the shared cache.
#[derive(Debug, Clone)]
pub enum SimLeg {
    Clmm(ClmmPoolState),
    Clob(ClobTopOfBook),
    Weighted(WeightedPoolState),
}

impl SimLeg {
    pub fn from_state(state: &VenueState) -> Self {
        match state {
            VenueState::Clmm { sqrt_price_x64, liquidity, fee_bps, .. } => SimLeg::Clmm(ClmmPoolState {
                sqrt_price_x64: *sqrt_price_x64,
                liquidity: *liquidity,
                fee_bps: *fee_bps,
            }),
            VenueState::Clob { best_bid, best_ask, bid_depth, ask_depth } => SimLeg::Clob(ClobTopOfBook {
                best_bid: *best_bid,
                best_ask: *best_ask,
                bid_depth: *bid_depth,
                ask_depth: *ask_depth,
            }),
            VenueState::Weighted {
                reserve_base,
                reserve_quote,
                weight_base,
                weight_quote,
                fee_bps,
            } => SimLeg::Weighted(WeightedPoolState {
                reserve_base: *reserve_base,
                reserve_quote: *reserve_quote,
                weight_base: *weight_base,
                weight_quote: *weight_quote,
                fee_bps: *fee_bps,
            }),
        }
    }

    fn sell(&self, amount_in: u128) -> u128 {
        match self {
            SimLeg::Clmm(state) => swap_within_tick(state, amount_in, true)
                .map(|(out, _)| out)
                .unwrap_or(0),
            SimLeg::Clob(book) => sell_into_bid(book, Decimal::from(amount_in as u64))
                .map(|d| d.trunc().to_string().parse().unwrap_or(0))
                .unwrap_or(0),
            SimLeg::Weighted(state) => sell_base_for_quote(state, Decimal::from(amount_in as u64))
                .map(|d| d.trunc().to_string().parse().unwrap_or(0))
                .unwrap_or(0),
        }
    }
}

/// Simulates a full route (each leg's output feeding the next) at a given
/// input size, without mutating any venue state.
pub fn simulate_route(route: &[SimLeg], amount_in: u128) -> u128 {
    let mut amount = amount_in;
    for leg in route {
        amount = leg.sell(amount);
        if amount == 0 {
            return 0;
        }
    }
    amount
}

/// Finds the optimal input size via ternary search, then applies the
/// net-profit gate against `estimated_gas`. Returns `None` if the
/// optimum's net profit after gas is not strictly positive.
pub fn optimize(route: &[SimLeg], max_input: u128, estimated_gas: u128) -> Option<(u128, u128)> {
    let profit_of = |amount_in: u128| -> i128 {
        let amount_out = simulate_route(route, amount_in);
        amount_out as i128 - amount_in as i128
    };

    let best_amount = ternary_search_max(1, max_input.max(1), profit_of);
    let best_profit = profit_of(best_amount);
    let net_profit = best_profit - estimated_gas as i128;

    if net_profit <= 0 {
        None
    } else {
        Some((best_amount, net_profit as u128))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn single_leg_weighted_route_profit_increases_then_plateaus() {
        let route = vec![SimLeg::Weighted(WeightedPoolState {
            reserve_base: dec!(1000000),
            reserve_quote: dec!(2000000),
            weight_base: dec!(0.5),
            weight_quote: dec!(0.5),
            fee_bps: 30,
        })];
        let small = simulate_route(&route, 100);
        let large = simulate_route(&route, 10_000);
        assert!(large > small);
    }

    #[test]
    fn optimize_rejects_when_gas_exceeds_best_profit() {
        let route = vec![SimLeg::Weighted(WeightedPoolState {
            reserve_base: dec!(1000000),
            reserve_quote: dec!(1000000),
            weight_base: dec!(0.5),
            weight_quote: dec!(0.5),
            fee_bps: 30,
        })];
        // roughly break-even pool; any nonzero gas estimate should reject.
        assert!(optimize(&route, 1000, 1_000_000).is_none());
    }

    #[test]
    fn optimize_accepts_genuinely_profitable_route() {
        let route = vec![SimLeg::Weighted(WeightedPoolState {
            reserve_base: dec!(100000000),
            reserve_quote: dec!(200000000),
            weight_base: dec!(0.5),
            weight_quote: dec!(0.5),
            fee_bps: 30,
        })];
        let result = optimize(&route, 1_000_000, 10);
        assert!(result.is_some());
        let (amount, profit) = result.unwrap();
        assert!(amount > 0);
        assert!(profit > 0);
    }
}

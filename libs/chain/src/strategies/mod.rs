//! The five/six-phase strategy choreography, written once and shared by
//! every entry in `arb_types::STRATEGY_TABLE`: guard, borrow, route, assert
//! profit, repay, emit. Two entry points exist, one per flash source
//! (`execute_via_flash_swap` for the CLMM flash-swap venue,
//! `execute_via_flash_base` for the order-book venue) because the two
//! flash primitives have different shapes; within each, every strategy in
//! the table shares the same function.

use crate::error::StrategyError;
use crate::venues::{DustOutcome, FlashBaseAdapter, FlashSwapAdapter, SwapAdapter};
use arb_types::{Capability, PauseSwitch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionEvent {
    pub strategy_tag: &'static str,
    pub amount_in: u128,
    pub profit: u128,
}

/// Critical ordering: profit must be asserted before the flash receipt is
/// repaid, so a shortfall aborts the whole composition before any asset
/// leaves the strategy's custody.
fn assert_profit(amount_in: u128, amount_out: u128, min_profit: u128) -> Result<u128, StrategyError> {
    if amount_out < amount_in {
        return Err(StrategyError::NotProfitable {
            expected: min_profit as i128,
            actual: amount_out as i128 - amount_in as i128,
        });
    }
    let profit = amount_out - amount_in;
    if profit < min_profit {
        return Err(StrategyError::NotProfitable {
            expected: min_profit as i128,
            actual: profit as i128,
        });
    }
    Ok(profit)
}

/// Walks `amount_in` through each route leg in order, swapping the
/// previous leg's output into the next.
fn route_through(route: &mut [&mut dyn SwapAdapter], amount_in: u128) -> Result<u128, StrategyError> {
    let mut amount = amount_in;
    for leg in route.iter_mut() {
        amount = leg.swap_a_to_b(amount)?;
    }
    Ok(amount)
}

/// Composition template for strategies whose flash primitive is the
/// swap-shaped CLMM flash loan (`tri_hop`/`two_hop` entries with
/// `FlashSource::ClmmFlashSwap`).
pub fn execute_via_flash_swap<F: FlashSwapAdapter>(
    strategy_tag: &'static str,
    _cap: &Capability,
    pause: &PauseSwitch,
    flash_venue: &mut F,
    route: &mut [&mut dyn SwapAdapter],
    amount_in: u128,
    min_profit: u128,
    zero_for_one: bool,
) -> Result<ExecutionEvent, StrategyError> {
    pause.assert_not_paused()?;

    if amount_in == 0 {
        return Err(StrategyError::ZeroAmount);
    }

    let (borrowed_out, receipt) = if zero_for_one {
        flash_venue.flash_swap_a_to_b(amount_in)?
    } else {
        flash_venue.flash_swap_b_to_a(amount_in)?
    };

    let final_amount = route_through(route, borrowed_out)?;

    let profit = assert_profit(amount_in, final_amount, min_profit)?;

    let profit = match flash_venue.repay_flash_swap(receipt, amount_in)? {
        DustOutcome::Destroyed => profit,
        DustOutcome::ReturnedToSender(remainder) => profit + remainder,
    };

    Ok(ExecutionEvent {
        strategy_tag,
        amount_in,
        profit,
    })
}

/// Composition template for strategies whose flash primitive is the
/// order-book venue's base-asset loan.
pub fn execute_via_flash_base<C: FlashBaseAdapter>(
    strategy_tag: &'static str,
    _cap: &Capability,
    pause: &PauseSwitch,
    flash_venue: &mut C,
    route: &mut [&mut dyn SwapAdapter],
    amount_in: u128,
    min_profit: u128,
) -> Result<ExecutionEvent, StrategyError> {
    pause.assert_not_paused()?;

    if amount_in == 0 {
        return Err(StrategyError::ZeroAmount);
    }

    let receipt = flash_venue.flash_borrow_base(amount_in)?;

    let final_amount = route_through(route, amount_in)?;

    let profit = assert_profit(amount_in, final_amount, min_profit)?;

    let profit = match flash_venue.flash_return_base(receipt, amount_in)? {
        DustOutcome::Destroyed => profit,
        DustOutcome::ReturnedToSender(remainder) => profit + remainder,
    };

    Ok(ExecutionEvent {
        strategy_tag,
        amount_in,
        profit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venues::clmm::{ClmmVenue, FlashClmmVenue};
    use crate::venues::clob::ClobVenue;
    use crate::venues::weighted::WeightedVenue;
    use arb_amm::clmm::ClmmPoolState;
    use arb_amm::clob::ClobTopOfBook;
    use arb_amm::weighted::WeightedPoolState;
    use rust_decimal_macros::dec;

    fn flash_clmm() -> FlashClmmVenue {
        FlashClmmVenue {
            state: ClmmPoolState {
                sqrt_price_x64: arb_amm::clmm::MAX_SQRT_PRICE / 2,
                liquidity: 10_000_000_000_000,
                fee_bps: 5,
            },
        }
    }

    fn plain_clmm(sqrt_price_x64: u128) -> ClmmVenue {
        ClmmVenue {
            state: ClmmPoolState {
                sqrt_price_x64,
                liquidity: 10_000_000_000_000,
                fee_bps: 5,
            },
        }
    }

    /// A weighted-amm pool priced at roughly 2 quote per base, large enough
    /// relative to the probe trade size that slippage does not erase the
    /// price divergence against the flash venue's near-1:1 CLMM price.
    fn favorable_weighted_venue() -> WeightedVenue {
        WeightedVenue {
            state: WeightedPoolState {
                reserve_base: dec!(100000000),
                reserve_quote: dec!(200000000),
                weight_base: dec!(0.5),
                weight_quote: dec!(0.5),
                fee_bps: 30,
            },
        }
    }

    #[test]
    fn profitable_round_trip_emits_event_and_leaves_no_receipt() {
        let cap = Capability::mint();
        let pause = PauseSwitch::new(false);
        let mut flash_venue = flash_clmm();
        let mut leg = favorable_weighted_venue();
        let mut route: Vec<&mut dyn SwapAdapter> = vec![&mut leg];

        let result = execute_via_flash_swap(
            "tri_clmm_flash_swap_clmm_primary_clmm_secondary",
            &cap,
            &pause,
            &mut flash_venue,
            &mut route,
            1_000_000,
            1,
            true,
        );

        assert!(result.is_ok());
        assert_eq!(arb_types::capability::ReceiptLeakGuard::outstanding(), 0);
    }

    #[test]
    fn paused_switch_aborts_before_borrowing() {
        let cap = Capability::mint();
        let pause = PauseSwitch::new(true);
        let mut flash_venue = flash_clmm();
        let mut route: Vec<&mut dyn SwapAdapter> = vec![];

        let result = execute_via_flash_swap(
            "arb_clmm_flash_swap_to_clmm_primary",
            &cap,
            &pause,
            &mut flash_venue,
            &mut route,
            1_000_000,
            1,
            true,
        );

        assert!(matches!(result, Err(StrategyError::Paused(_))));
    }

    #[test]
    fn unprofitable_route_aborts_before_repay() {
        let cap = Capability::mint();
        let pause = PauseSwitch::new(false);
        let mut flash_venue = flash_clmm();
        // Identical price on the route leg to the flash venue: fees alone
        // make the round trip unprofitable.
        let mut leg = plain_clmm(arb_amm::clmm::MAX_SQRT_PRICE / 2);
        let mut route: Vec<&mut dyn SwapAdapter> = vec![&mut leg];

        let result = execute_via_flash_swap(
            "arb_clmm_flash_swap_to_clmm_secondary",
            &cap,
            &pause,
            &mut flash_venue,
            &mut route,
            1_000_000,
            1,
            true,
        );

        assert!(matches!(result, Err(StrategyError::NotProfitable { .. })));
    }

    #[test]
    fn clob_flash_base_round_trip() {
        let cap = Capability::mint();
        let pause = PauseSwitch::new(false);
        let mut clob = ClobVenue {
            book: ClobTopOfBook {
                best_bid: dec!(99.5),
                best_ask: dec!(100.5),
                bid_depth: dec!(1_000_000),
                ask_depth: dec!(1_000_000),
            },
            base_reserve: 10_000_000,
        };
        let mut leg = favorable_weighted_venue();
        let mut route: Vec<&mut dyn SwapAdapter> = vec![&mut leg];

        let result = execute_via_flash_base(
            "arb_clob_to_clmm_primary",
            &cap,
            &pause,
            &mut clob,
            &mut route,
            1_000_000,
            1,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn boundary_profit_exactly_meeting_the_floor_passes() {
        assert_eq!(assert_profit(100, 110, 10), Ok(10));
    }

    #[test]
    fn boundary_profit_one_unit_short_of_the_floor_fails() {
        assert_eq!(
            assert_profit(100, 109, 10),
            Err(StrategyError::NotProfitable { expected: 10, actual: 9 })
        );
    }

    #[test]
    fn boundary_amount_out_below_amount_in_reports_a_negative_actual() {
        assert_eq!(
            assert_profit(110, 100, 10),
            Err(StrategyError::NotProfitable { expected: 10, actual: -10 })
        );
    }

    #[test]
    fn boundary_large_values_do_not_overflow_the_subtraction() {
        let amount_in = u64::MAX as u128;
        let amount_out = amount_in + 1_000;
        assert_eq!(assert_profit(amount_in, amount_out, 1), Ok(1_000));
    }
}

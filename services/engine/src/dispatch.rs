//! Bridges a scanned `Opportunity` to the actual on-chain-composition
//! choreography in `arb_chain::strategies`, by strategy tag rather than by
//! hand. This is a local pre-flight: it runs the real composition
//! functions against the same cached pool state the optimizer already
//! simulated against, as a sanity check that the `StrategyTemplate` the
//! tag resolves to is actually composable with the route the scanner
//! found, before a transaction is ever built or dry-run against the
//! remote `ChainClient`.

use crate::optimizer::SimLeg;
use arb_chain::venues::clmm::{ClmmVenue, FlashClmmVenue};
use arb_chain::venues::clob::ClobVenue;
use arb_chain::venues::weighted::WeightedVenue;
use arb_chain::venues::SwapAdapter;
use arb_chain::{execute_via_flash_base, execute_via_flash_swap, ExecutionEvent, StrategyError};
use arb_types::{Capability, FlashSource, Opportunity, PauseSwitch};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("no strategy template registered for tag {0}")]
    UnknownStrategy(&'static str),
    #[error("route legs do not match the strategy template's venue kinds")]
    RouteShapeMismatch,
    #[error(transparent)]
    Execution(#[from] StrategyError),
}

/// Owns a concrete venue adapter for one non-flash leg of a route, so the
/// `&mut dyn SwapAdapter` slice passed into the choreography borrows from
/// storage that outlives the call.
enum RouteVenue {
    Clmm(ClmmVenue),
    Clob(ClobVenue),
    Weighted(WeightedVenue),
}

impl RouteVenue {
    fn from_leg(leg: &SimLeg) -> Self {
        match leg {
            SimLeg::Clmm(state) => RouteVenue::Clmm(ClmmVenue { state: *state }),
            SimLeg::Clob(book) => RouteVenue::Clob(ClobVenue { book: *book, base_reserve: 0 }),
            SimLeg::Weighted(state) => RouteVenue::Weighted(WeightedVenue { state: *state }),
        }
    }

    fn as_swap_adapter(&mut self) -> &mut dyn SwapAdapter {
        match self {
            RouteVenue::Clmm(v) => v,
            RouteVenue::Clob(v) => v,
            RouteVenue::Weighted(v) => v,
        }
    }
}

/// Runs the real `arb_chain` choreography for `opportunity.strategy_tag`
/// against `route` (the same simulation legs the optimizer already sized),
/// dispatching on `flash_source` to call `execute_via_flash_swap` or
/// `execute_via_flash_base`. `route[0]` is always the flash-origin leg;
/// `route[1..]` is the swap-through route. The flash direction is fixed
/// (`zero_for_one = true`) since this pre-flight only needs to confirm the
/// composition is well-formed and profitable, not reproduce the exact
/// on-chain execution path.
pub fn simulate_locally(
    opportunity: &Opportunity,
    route: &[SimLeg],
    amount_in: u128,
    min_profit: u128,
) -> Result<ExecutionEvent, DispatchError> {
    let template = arb_types::lookup(opportunity.strategy_tag)
        .ok_or(DispatchError::UnknownStrategy(opportunity.strategy_tag))?;

    if route.len() != template.legs.len() || route.is_empty() {
        return Err(DispatchError::RouteShapeMismatch);
    }

    let cap = Capability::mint();
    let pause = PauseSwitch::new(false);
    let mut rest: Vec<RouteVenue> = route[1..].iter().map(RouteVenue::from_leg).collect();
    let mut adapters: Vec<&mut dyn SwapAdapter> = rest.iter_mut().map(RouteVenue::as_swap_adapter).collect();

    match template.flash_source {
        FlashSource::ClmmFlashSwap => {
            let SimLeg::Clmm(state) = &route[0] else {
                return Err(DispatchError::RouteShapeMismatch);
            };
            let mut flash_venue = FlashClmmVenue { state: *state };
            let event = execute_via_flash_swap(
                opportunity.strategy_tag,
                &cap,
                &pause,
                &mut flash_venue,
                &mut adapters,
                amount_in,
                min_profit,
                true,
            )?;
            Ok(event)
        }
        FlashSource::Clob => {
            let SimLeg::Clob(book) = &route[0] else {
                return Err(DispatchError::RouteShapeMismatch);
            };
            let mut flash_venue = ClobVenue {
                book: *book,
                base_reserve: amount_in.saturating_mul(2).max(1),
            };
            let event = execute_via_flash_base(
                opportunity.strategy_tag,
                &cap,
                &pause,
                &mut flash_venue,
                &mut adapters,
                amount_in,
                min_profit,
            )?;
            Ok(event)
        }
    }
}

//! Weighted-AMM venue. Implements only `SwapAdapter` (never a flash trait),
//! which is how the type system enforces the sell-only, no-flash
//! restriction named in the component design; slippage protection is
//! disabled and the minimum output is fixed at 1 unit rather than
//! caller-supplied.

use super::SwapAdapter;
use crate::error::StrategyError;
use arb_amm::weighted::{sell_base_for_quote, WeightedPoolState};
use rust_decimal::Decimal;

pub struct WeightedVenue {
    pub state: WeightedPoolState,
}

const MIN_OUTPUT: u128 = 1;

impl SwapAdapter for WeightedVenue {
    fn swap_a_to_b(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let out = sell_base_for_quote(&self.state, Decimal::from(amount_in as u64))
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        let out_units: u128 = out.trunc().to_string().parse().unwrap_or(0);
        if out_units < MIN_OUTPUT {
            return Err(StrategyError::Venue("output below minimum of 1 unit".into()));
        }
        self.state.reserve_base += Decimal::from(amount_in as u64);
        self.state.reserve_quote -= out;
        Ok(out_units)
    }

    fn swap_b_to_a(&mut self, _amount_in: u128) -> Result<u128, StrategyError> {
        Err(StrategyError::Venue(
            "weighted-amm venue only supports selling the base asset".into(),
        ))
    }
}

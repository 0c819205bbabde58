//! Two CLMM adapter shapes: `ClmmVenue` for the primary/secondary venues
//! (swap only) and `FlashClmmVenue` for the venue that can also originate a
//! swap-shaped flash loan.

use super::{settle_dust, DustOutcome, FlashSwapAdapter, FlashSwapReceipt, SwapAdapter};
use crate::error::StrategyError;
use arb_amm::clmm::{swap_within_tick, ClmmPoolState};
#[cfg(any(test, feature = "test-util"))]
use arb_types::capability::ReceiptLeakGuard;

pub struct ClmmVenue {
    pub state: ClmmPoolState,
}

impl SwapAdapter for ClmmVenue {
    fn swap_a_to_b(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let (out, new_price) = swap_within_tick(&self.state, amount_in, true)
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        self.state.sqrt_price_x64 = new_price;
        Ok(out)
    }

    fn swap_b_to_a(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let (out, new_price) = swap_within_tick(&self.state, amount_in, false)
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        self.state.sqrt_price_x64 = new_price;
        Ok(out)
    }
}

pub struct FlashClmmVenue {
    pub state: ClmmPoolState,
}

impl SwapAdapter for FlashClmmVenue {
    fn swap_a_to_b(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let (out, new_price) = swap_within_tick(&self.state, amount_in, true)
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        self.state.sqrt_price_x64 = new_price;
        Ok(out)
    }

    fn swap_b_to_a(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let (out, new_price) = swap_within_tick(&self.state, amount_in, false)
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        self.state.sqrt_price_x64 = new_price;
        Ok(out)
    }
}

impl FlashSwapAdapter for FlashClmmVenue {
    fn flash_swap_a_to_b(&mut self, amount_in: u128) -> Result<(u128, FlashSwapReceipt), StrategyError> {
        let out = self.swap_a_to_b(amount_in)?;
        #[cfg(any(test, feature = "test-util"))]
        ReceiptLeakGuard::on_mint();
        Ok((
            out,
            FlashSwapReceipt {
                borrowed: amount_in,
                zero_for_one: true,
            },
        ))
    }

    fn flash_swap_b_to_a(&mut self, amount_in: u128) -> Result<(u128, FlashSwapReceipt), StrategyError> {
        let out = self.swap_b_to_a(amount_in)?;
        #[cfg(any(test, feature = "test-util"))]
        ReceiptLeakGuard::on_mint();
        Ok((
            out,
            FlashSwapReceipt {
                borrowed: amount_in,
                zero_for_one: false,
            },
        ))
    }

    fn repay_flash_swap(&mut self, receipt: FlashSwapReceipt, amount: u128) -> Result<DustOutcome, StrategyError> {
        let debt = receipt.borrowed;
        let outcome = settle_dust(amount, debt)?;
        // Repaying swaps exactly the debt back in the opposite direction;
        // any amount beyond the debt is remainder in the borrowed asset,
        // not something more to swap.
        if receipt.zero_for_one {
            self.swap_b_to_a(debt)?;
        } else {
            self.swap_a_to_b(debt)?;
        }
        #[cfg(any(test, feature = "test-util"))]
        ReceiptLeakGuard::on_settle();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> ClmmPoolState {
        ClmmPoolState {
            sqrt_price_x64: arb_amm::clmm::MAX_SQRT_PRICE / 2,
            liquidity: 1_000_000_000_000,
            fee_bps: 30,
        }
    }

    #[test]
    fn flash_swap_round_trip_leaves_no_outstanding_receipt() {
        let mut venue = FlashClmmVenue { state: pool() };
        let (out, receipt) = venue.flash_swap_a_to_b(1_000_000).unwrap();
        assert!(out > 0);
        venue.repay_flash_swap(receipt, 1_000_000).unwrap();
        assert_eq!(ReceiptLeakGuard::outstanding(), 0);
    }

    #[test]
    fn underpaying_flash_swap_is_rejected() {
        let mut venue = FlashClmmVenue { state: pool() };
        let (_, receipt) = venue.flash_swap_a_to_b(1_000_000).unwrap();
        let result = venue.repay_flash_swap(receipt, 1);
        assert_eq!(result, Err(StrategyError::RepaymentMismatch));
    }

    #[test]
    fn overpaying_flash_swap_returns_the_remainder_to_the_sender() {
        let mut venue = FlashClmmVenue { state: pool() };
        let (_, receipt) = venue.flash_swap_a_to_b(1_000_000).unwrap();
        let outcome = venue.repay_flash_swap(receipt, 1_000_100).unwrap();
        assert_eq!(outcome, DustOutcome::ReturnedToSender(100));
        assert_eq!(ReceiptLeakGuard::outstanding(), 0);
    }

    #[test]
    fn exact_repayment_destroys_no_remainder() {
        let mut venue = FlashClmmVenue { state: pool() };
        let (_, receipt) = venue.flash_swap_a_to_b(1_000_000).unwrap();
        let outcome = venue.repay_flash_swap(receipt, 1_000_000).unwrap();
        assert_eq!(outcome, DustOutcome::Destroyed);
    }
}

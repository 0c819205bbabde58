//! Venue adapter traits. One trait per adapter *kind* rather than per
//! concrete venue: the five venues named in the component design share an
//! operation set within their kind and differ only in the concrete pool
//! handle, so a CLMM adapter trait covers both CLMM venues and a separate
//! flash-capable CLMM trait covers the flash-swap variant. The weighted-AMM
//! venue implements neither flash trait, which is how the type system
//! enforces that it can never originate a flash primitive.

pub mod clmm;
pub mod clob;
pub mod weighted;

use crate::error::StrategyError;

/// Plain two-sided swap, implemented by every venue kind.
pub trait SwapAdapter {
    fn swap_a_to_b(&mut self, amount_in: u128) -> Result<u128, StrategyError>;
    fn swap_b_to_a(&mut self, amount_in: u128) -> Result<u128, StrategyError>;
}

/// A hot-potato receipt for a swap-shaped flash loan: a strategy borrows by
/// swapping, and must repay by swapping back (or providing an equivalent
/// amount) before the composition returns. Carries no public constructor
/// outside `venues::clmm`.
#[derive(Debug)]
#[must_use = "a flash receipt must be settled via repay_flash_swap before it is dropped"]
pub struct FlashSwapReceipt {
    pub(crate) borrowed: u128,
    pub(crate) zero_for_one: bool,
}

impl FlashSwapReceipt {
    pub fn borrowed(&self) -> u128 {
        self.borrowed
    }
}

/// Implemented only by venues that can originate a swap-shaped flash loan.
pub trait FlashSwapAdapter: SwapAdapter {
    fn flash_swap_a_to_b(&mut self, amount_in: u128) -> Result<(u128, FlashSwapReceipt), StrategyError>;
    fn flash_swap_b_to_a(&mut self, amount_in: u128) -> Result<(u128, FlashSwapReceipt), StrategyError>;
    /// `amount` may exceed the receipt's debt; any excess is remainder, not
    /// an additional deposit into the venue's own reserves, and is reported
    /// back via `DustOutcome` rather than silently absorbed.
    fn repay_flash_swap(&mut self, receipt: FlashSwapReceipt, amount: u128) -> Result<DustOutcome, StrategyError>;
    fn debt_of(&self, receipt: &FlashSwapReceipt) -> u128 {
        receipt.borrowed
    }
}

/// A hot-potato receipt for a plain base-asset flash loan, as originated by
/// the order-book venue rather than a swap.
#[derive(Debug)]
#[must_use = "a flash receipt must be settled via flash_return_base before it is dropped"]
pub struct FlashBaseReceipt {
    pub(crate) borrowed: u128,
}

impl FlashBaseReceipt {
    pub fn borrowed(&self) -> u128 {
        self.borrowed
    }
}

/// Implemented only by venues that can lend their base asset directly.
pub trait FlashBaseAdapter {
    fn flash_borrow_base(&mut self, amount: u128) -> Result<FlashBaseReceipt, StrategyError>;
    /// `amount` may exceed the receipt's debt; any excess is remainder, not
    /// an additional deposit into the venue's own reserves, and is reported
    /// back via `DustOutcome` rather than silently absorbed.
    fn flash_return_base(&mut self, receipt: FlashBaseReceipt, amount: u128) -> Result<DustOutcome, StrategyError>;
}

/// What becomes of the amount repaid in excess of a flash receipt's exact
/// debt. A venue must never fold this excess into its own reserves as if
/// it were ordinary liquidity; it is either nothing (`repaid == debt`, the
/// common case) or an amount the caller is owed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DustOutcome {
    Destroyed,
    ReturnedToSender(u128),
}

/// Splits a repayment into the portion that settles `debt` and the
/// remainder, if any. Errs if `repaid` does not even cover the debt.
pub fn settle_dust(repaid: u128, debt: u128) -> Result<DustOutcome, StrategyError> {
    if repaid < debt {
        return Err(StrategyError::RepaymentMismatch);
    }
    match repaid - debt {
        0 => Ok(DustOutcome::Destroyed),
        remainder => Ok(DustOutcome::ReturnedToSender(remainder)),
    }
}

#[cfg(test)]
mod dust_tests {
    use super::*;

    #[test]
    fn exact_repayment_leaves_no_dust() {
        assert_eq!(settle_dust(100, 100), Ok(DustOutcome::Destroyed));
    }

    #[test]
    fn one_unit_overpayment_is_returned_to_sender() {
        assert_eq!(settle_dust(101, 100), Ok(DustOutcome::ReturnedToSender(1)));
    }

    #[test]
    fn underpayment_is_rejected_before_any_dust_accounting() {
        assert_eq!(settle_dust(99, 100), Err(StrategyError::RepaymentMismatch));
    }
}

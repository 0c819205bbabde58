//! Order-book venue: plain swaps against top-of-book, plus a base-asset
//! flash loan that is not shaped like a swap (distinct from the CLMM
//! flash-swap primitive).

use super::{settle_dust, DustOutcome, FlashBaseAdapter, FlashBaseReceipt, SwapAdapter};
use crate::error::StrategyError;
use arb_amm::clob::{buy_from_ask, sell_into_bid, ClobTopOfBook};
#[cfg(any(test, feature = "test-util"))]
use arb_types::capability::ReceiptLeakGuard;
use rust_decimal::Decimal;

pub struct ClobVenue {
    pub book: ClobTopOfBook,
    /// Base asset reserve available to back a `flash_borrow_base` call.
    pub base_reserve: u128,
}

fn to_decimal(amount: u128) -> Decimal {
    Decimal::from(amount as u64)
}

fn to_u128(amount: Decimal) -> u128 {
    amount.trunc().to_string().parse().unwrap_or(0)
}

impl SwapAdapter for ClobVenue {
    fn swap_a_to_b(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let out = sell_into_bid(&self.book, to_decimal(amount_in))
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        Ok(to_u128(out))
    }

    fn swap_b_to_a(&mut self, amount_in: u128) -> Result<u128, StrategyError> {
        let out = buy_from_ask(&self.book, to_decimal(amount_in))
            .map_err(|e| StrategyError::Venue(e.to_string()))?;
        Ok(to_u128(out))
    }
}

impl FlashBaseAdapter for ClobVenue {
    fn flash_borrow_base(&mut self, amount: u128) -> Result<FlashBaseReceipt, StrategyError> {
        if amount == 0 {
            return Err(StrategyError::ZeroAmount);
        }
        if amount > self.base_reserve {
            return Err(StrategyError::Venue("insufficient base reserve for flash borrow".into()));
        }
        self.base_reserve -= amount;
        #[cfg(any(test, feature = "test-util"))]
        ReceiptLeakGuard::on_mint();
        Ok(FlashBaseReceipt { borrowed: amount })
    }

    fn flash_return_base(&mut self, receipt: FlashBaseReceipt, amount: u128) -> Result<DustOutcome, StrategyError> {
        let debt = receipt.borrowed;
        let outcome = settle_dust(amount, debt)?;
        self.base_reserve += debt;
        #[cfg(any(test, feature = "test-util"))]
        ReceiptLeakGuard::on_settle();
        Ok(outcome)
    }
}

//! Top-of-book/depth model for central-limit-order-book venues. Simulates
//! a market order walking the visible depth at a single price level,
//! matching the scanner's requirement to simulate each leg locally without
//! a live order-book snapshot beyond best bid/ask and aggregate depth.

use crate::Error;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClobTopOfBook {
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub bid_depth: Decimal,
    pub ask_depth: Decimal,
}

/// Selling `amount_in` base against the bid side; fills at `best_bid` up to
/// `bid_depth`, then rejects rather than walking past the visible level.
pub fn sell_into_bid(book: &ClobTopOfBook, amount_in: Decimal) -> Result<Decimal, Error> {
    if amount_in <= Decimal::ZERO {
        return Err(Error::ZeroAmount);
    }
    if amount_in > book.bid_depth {
        return Err(Error::InsufficientLiquidity);
    }
    Ok(amount_in * book.best_bid)
}

/// Buying base against the ask side with `amount_in` quote; fills at
/// `best_ask` up to the quote value of `ask_depth`.
pub fn buy_from_ask(book: &ClobTopOfBook, amount_in_quote: Decimal) -> Result<Decimal, Error> {
    if amount_in_quote <= Decimal::ZERO {
        return Err(Error::ZeroAmount);
    }
    if book.best_ask <= Decimal::ZERO {
        return Err(Error::ZeroLiquidity);
    }
    let base_out = amount_in_quote / book.best_ask;
    if base_out > book.ask_depth {
        return Err(Error::InsufficientLiquidity);
    }
    Ok(base_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn book() -> ClobTopOfBook {
        ClobTopOfBook {
            best_bid: dec!(99.5),
            best_ask: dec!(100.5),
            bid_depth: dec!(50),
            ask_depth: dec!(50),
        }
    }

    #[test]
    fn sell_within_depth_fills_at_best_bid() {
        assert_eq!(sell_into_bid(&book(), dec!(10)).unwrap(), dec!(995.0));
    }

    #[test]
    fn sell_beyond_depth_rejected() {
        assert_eq!(
            sell_into_bid(&book(), dec!(100)),
            Err(Error::InsufficientLiquidity)
        );
    }

    #[test]
    fn buy_within_depth_fills_at_best_ask() {
        let out = buy_from_ask(&book(), dec!(1005)).unwrap();
        assert_eq!(out, dec!(10));
    }
}

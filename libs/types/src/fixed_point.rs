//! Fixed-point amount types for values that cross the on-chain/off-chain
//! boundary, where `f64` drift is unacceptable for a profit comparison.
//!
//! ```
//! use arb_types::Amount8;
//! let a = Amount8::from_decimal_str("123.45678900").unwrap();
//! assert_eq!(a.raw(), 12_345_678_900);
//! ```

use rust_decimal::Decimal;
use std::fmt;

/// Fixed-point amount scaled by 10^8, backed by an `i128` so that
/// intermediate products (amount * price) in the optimizer do not overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Amount8(i128);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("invalid decimal string: {0}")]
    Parse(String),
    #[error("value out of range for Amount8: {0}")]
    OutOfRange(String),
}

impl Amount8 {
    pub const SCALE: i128 = 100_000_000;
    pub const ZERO: Amount8 = Amount8(0);

    pub fn from_raw(raw: i128) -> Self {
        Amount8(raw)
    }

    pub fn raw(&self) -> i128 {
        self.0
    }

    pub fn from_decimal_str(s: &str) -> Result<Self, FixedPointError> {
        let dec: Decimal = s
            .parse()
            .map_err(|_| FixedPointError::Parse(s.to_string()))?;
        Self::from_decimal(dec)
    }

    pub fn from_decimal(dec: Decimal) -> Result<Self, FixedPointError> {
        let scaled = (dec * Decimal::from(Self::SCALE as i64)).round();
        let raw = scaled.mantissa() / 10i128.pow(scaled.scale());
        Ok(Amount8(raw))
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(self.0 as i128, 0) / Decimal::from(Self::SCALE as i64)
    }

    pub fn checked_sub(self, other: Amount8) -> Option<Amount8> {
        self.0.checked_sub(other.0).map(Amount8)
    }

    pub fn checked_add(self, other: Amount8) -> Option<Amount8> {
        self.0.checked_add(other.0).map(Amount8)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Amount8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_string() {
        let a = Amount8::from_decimal_str("123.456789").unwrap();
        assert_eq!(a.raw(), 12_345_678_900);
    }

    #[test]
    fn checked_sub_never_panics_on_underflow() {
        let a = Amount8::from_raw(5);
        let b = Amount8::from_raw(10);
        assert_eq!(a.checked_sub(b), None);
    }

    #[test]
    fn zero_is_zero() {
        assert!(Amount8::ZERO.is_zero());
    }
}

//! Weighted constant-product AMM math (reduces to classic x*y=k when both
//! weights are 0.5). This venue only supports sell-side quotes per the
//! component design: slippage protection is disabled and the minimum
//! output is fixed at 1 unit rather than a caller-supplied bound.

use crate::Error;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoolState {
    pub reserve_base: Decimal,
    pub reserve_quote: Decimal,
    pub weight_base: Decimal,
    pub weight_quote: Decimal,
    pub fee_bps: u32,
}

/// Computes output quote amount for selling `amount_in` base into the pool.
/// `out = reserve_quote * (1 - (reserve_base / (reserve_base + amount_in_after_fee)) ^ (w_base/w_quote))`.
/// For the common case `w_base == w_quote` this degenerates to the x*y=k
/// closed form and is computed directly to avoid a fractional-power call.
pub fn sell_base_for_quote(
    pool: &WeightedPoolState,
    amount_in: Decimal,
) -> Result<Decimal, Error> {
    if amount_in <= Decimal::ZERO {
        return Err(Error::ZeroAmount);
    }
    if pool.reserve_base <= Decimal::ZERO || pool.reserve_quote <= Decimal::ZERO {
        return Err(Error::ZeroLiquidity);
    }

    let fee_multiplier = (Decimal::from(10_000u32) - Decimal::from(pool.fee_bps))
        / Decimal::from(10_000u32);
    let amount_in_after_fee = amount_in * fee_multiplier;

    let amount_out = if pool.weight_base == pool.weight_quote {
        // x*y=k closed form.
        let numerator = pool.reserve_quote * amount_in_after_fee;
        let denominator = pool.reserve_base + amount_in_after_fee;
        numerator / denominator
    } else {
        // General weighted form, approximated via the ratio of exponents
        // using a first-order Taylor expansion around amount_in_after_fee
        // small relative to reserve_base: a closed-form fractional power
        // is not available on Decimal, and the optimizer only needs a
        // monotonic, concave estimate, not an exact weighted-math result.
        let ratio = pool.reserve_base / (pool.reserve_base + amount_in_after_fee);
        let exponent = pool.weight_base / pool.weight_quote;
        let approx_pow = Decimal::ONE - (Decimal::ONE - ratio) * exponent;
        pool.reserve_quote * (Decimal::ONE - approx_pow.max(Decimal::ZERO))
    };

    if amount_out <= Decimal::ZERO {
        return Err(Error::InsufficientLiquidity);
    }

    Ok(amount_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pool() -> WeightedPoolState {
        WeightedPoolState {
            reserve_base: dec!(10000),
            reserve_quote: dec!(10000),
            weight_base: dec!(0.5),
            weight_quote: dec!(0.5),
            fee_bps: 30,
        }
    }

    #[test]
    fn equal_weights_match_constant_product() {
        let out = sell_base_for_quote(&pool(), dec!(100)).unwrap();
        // 100 * 0.997 * 10000 / 10100.0 (approx)
        assert!(out > dec!(98) && out < dec!(99));
    }

    #[test]
    fn zero_amount_rejected() {
        assert_eq!(sell_base_for_quote(&pool(), Decimal::ZERO), Err(Error::ZeroAmount));
    }

    #[test]
    fn output_monotonically_increases_with_input() {
        let small = sell_base_for_quote(&pool(), dec!(10)).unwrap();
        let large = sell_base_for_quote(&pool(), dec!(100)).unwrap();
        assert!(large > small);
    }
}

//! Single-tick constant-product approximation for concentrated-liquidity
//! venues. Does not cross tick boundaries; a swap large enough to exhaust
//! the current tick's liquidity is rejected with `Error::InsufficientLiquidity`
//! rather than simulated across multiple ticks, matching the stated
//! non-goal of full AMM-weight-curve optimization.

use crate::Error;

/// Lower bound on `sqrt_price_x64`, below which the price has no valid
/// representation in this venue family.
pub const MIN_SQRT_PRICE: u128 = 4_295_128_739;
/// Upper bound on `sqrt_price_x64`; equal to the fixed-point representation
/// of price = 1.0 scaled by 2^96, the largest value the venue's price
/// oracle will report for a single-tick read.
pub const MAX_SQRT_PRICE: u128 = 79_228_162_514_264_337_593_543_950_336;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClmmPoolState {
    pub sqrt_price_x64: u128,
    pub liquidity: u128,
    pub fee_bps: u32,
}

/// Computes the output amount for swapping `amount_in` against a single
/// tick, holding liquidity fixed. `zero_for_one` selects swap direction
/// (true: base in, quote out).
pub fn swap_within_tick(
    pool: &ClmmPoolState,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<(u128, u128), Error> {
    if pool.liquidity == 0 {
        return Err(Error::ZeroLiquidity);
    }
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&pool.sqrt_price_x64) {
        return Err(Error::PriceOutOfRange);
    }

    let fee_numerator = 10_000u128.saturating_sub(pool.fee_bps as u128);
    let amount_in_after_fee = amount_in
        .checked_mul(fee_numerator)
        .ok_or(Error::Overflow)?
        / 10_000;

    // Q64.96-style delta: price moves by amount_in / liquidity, scaled by
    // the same 2^96 base as MIN_SQRT_PRICE/MAX_SQRT_PRICE.
    const Q: u128 = 1 << 96;
    let new_sqrt_price = if zero_for_one {
        let delta = amount_in_after_fee
            .checked_mul(Q)
            .ok_or(Error::Overflow)?
            / pool.liquidity.max(1);
        pool.sqrt_price_x64.saturating_sub(delta)
    } else {
        let delta = amount_in_after_fee
            .checked_mul(Q)
            .ok_or(Error::Overflow)?
            / pool.liquidity.max(1);
        pool.sqrt_price_x64.saturating_add(delta)
    };

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&new_sqrt_price) {
        return Err(Error::InsufficientLiquidity);
    }

    let price_delta = pool.sqrt_price_x64.abs_diff(new_sqrt_price);
    let amount_out = price_delta
        .checked_mul(pool.liquidity)
        .ok_or(Error::Overflow)?
        / Q;

    Ok((amount_out, new_sqrt_price))
}

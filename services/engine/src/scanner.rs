//! Pairwise (two-hop, O(N^2)) and triangular (tri-hop, O(N^3) with cycle
//! pruning) opportunity discovery over the shared pool cache. Produces
//! coarse `Opportunity` estimates at a fixed probe size; the optimizer
//! stage resizes survivors.

use arb_types::{lookup_by_legs, DecimalsMap, Opportunity, PoolSnapshot, VenueState};
use rust_decimal::Decimal;
use tracing::debug;

const TWO_HOP_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 3); // 0.001 == 0.1%
const TRI_HOP_THRESHOLD_RATE: Decimal = Decimal::from_parts(1003, 0, 0, false, 3); // 1.003
const DEFAULT_PROBE_SIZE: u128 = 1;
const POOL_STALENESS_NS: u64 = 10 * 1_000_000_000;

/// A rough quote-per-base price for threshold comparisons. Not used for
/// actual execution sizing, only to decide whether a pair/triple is worth
/// handing to the optimizer. Normalized through `decimals` before it is
/// returned, since a raw CLMM `sqrt_price_x64` reading and a CLOB mid-price
/// live on different decimal scales and are not comparable until both are
/// expressed in the same real-unit terms.
fn implied_price(snapshot: &PoolSnapshot, decimals: &DecimalsMap) -> Option<Decimal> {
    let raw = match &snapshot.state {
        VenueState::Clmm { sqrt_price_x64, .. } => {
            let scale = Decimal::from(1_000_000_000_000_000_000u128);
            let sqrt_scaled = Decimal::from(*sqrt_price_x64) / scale;
            sqrt_scaled * sqrt_scaled
        }
        VenueState::Clob { best_bid, best_ask, .. } => (*best_bid + *best_ask) / Decimal::TWO,
        VenueState::Weighted {
            reserve_base,
            reserve_quote,
            ..
        } => {
            if *reserve_base <= Decimal::ZERO {
                return None;
            }
            *reserve_quote / *reserve_base
        }
    };
    Some(decimals.normalize_price(raw, snapshot.base, snapshot.quote))
}

fn fresh(snapshot: &PoolSnapshot, now_ns: u64) -> bool {
    !snapshot.is_stale(now_ns, POOL_STALENESS_NS)
}

/// Two-hop scan: for every ordered pair of pools sharing both assets,
/// flags a candidate when the implied prices diverge by more than the
/// threshold.
pub fn scan_two_hop(pools: &[PoolSnapshot], decimals: &DecimalsMap, now_ns: u64) -> Vec<Opportunity> {
    let mut found = Vec::new();
    for i in 0..pools.len() {
        for j in 0..pools.len() {
            if i == j {
                continue;
            }
            let (a, b) = (&pools[i], &pools[j]);
            if !(fresh(a, now_ns) && fresh(b, now_ns)) {
                continue;
            }
            if a.base != b.base || a.quote != b.quote {
                continue;
            }
            let (Some(pa), Some(pb)) = (implied_price(a, decimals), implied_price(b, decimals)) else {
                continue;
            };
            if pa <= Decimal::ZERO || pb <= Decimal::ZERO {
                continue;
            }
            let spread = (pb - pa).abs() / pa;
            if spread <= TWO_HOP_THRESHOLD {
                continue;
            }
            // The tag must name the venues actually matched, in the order
            // matched, so a table lookup drives it rather than a fixed
            // literal that would drift from the legs below it.
            let Some(template) = lookup_by_legs(&[a.venue, b.venue]) else {
                continue;
            };
            debug!(pool_a = ?a.pool, pool_b = ?b.pool, %spread, tag = template.tag, "two-hop candidate found");
            found.push(Opportunity {
                strategy_tag: template.tag,
                legs: vec![
                    arb_types::PoolKey { venue: a.venue, pool: a.pool },
                    arb_types::PoolKey { venue: b.venue, pool: b.pool },
                ],
                estimated_amount_in: arb_types::Amount8::from_raw(DEFAULT_PROBE_SIZE as i128),
                estimated_profit: arb_types::Amount8::from_raw(0),
                discovered_at_ns: now_ns,
            });
        }
    }
    found
}

/// Tri-hop scan: for every ordered triple of pools forming a cycle over
/// three distinct assets, flags a candidate when the product of implied
/// conversion rates around the cycle exceeds the composite threshold.
/// Cycles are pruned as soon as a partial product cannot recover: if the
/// first two legs already fall far enough below 1 that no third leg could
/// push the composite above threshold, the triple is skipped without
/// evaluating the third leg.
pub fn scan_tri_hop(pools: &[PoolSnapshot], decimals: &DecimalsMap, now_ns: u64) -> Vec<Opportunity> {
    let mut found = Vec::new();
    let assets = |p: &PoolSnapshot| (p.base, p.quote);

    for i in 0..pools.len() {
        if !fresh(&pools[i], now_ns) {
            continue;
        }
        let (a0, a1) = assets(&pools[i]);
        let Some(p0) = implied_price(&pools[i], decimals) else { continue };
        if p0 <= Decimal::ZERO {
            continue;
        }

        for j in 0..pools.len() {
            if i == j || !fresh(&pools[j], now_ns) {
                continue;
            }
            if pools[j].base != a1 {
                continue;
            }
            let a2 = pools[j].quote;
            let Some(p1) = implied_price(&pools[j], decimals) else { continue };
            if p1 <= Decimal::ZERO {
                continue;
            }

            let partial = p0 * p1;
            // Pruning: even a third leg with an implausibly large rate
            // (10x) could not close a gap this wide, so skip the inner loop.
            if partial * Decimal::from(10) < TRI_HOP_THRESHOLD_RATE {
                continue;
            }

            for k in 0..pools.len() {
                if k == i || k == j || !fresh(&pools[k], now_ns) {
                    continue;
                }
                if pools[k].base != a2 || pools[k].quote != a0 {
                    continue;
                }
                let Some(p2) = implied_price(&pools[k], decimals) else { continue };
                let composite = partial * p2;
                if composite <= TRI_HOP_THRESHOLD_RATE {
                    continue;
                }
                let Some(template) = lookup_by_legs(&[pools[i].venue, pools[j].venue, pools[k].venue]) else {
                    continue;
                };
                debug!(%composite, tag = template.tag, "tri-hop candidate found");
                found.push(Opportunity {
                    strategy_tag: template.tag,
                    legs: vec![
                        arb_types::PoolKey { venue: pools[i].venue, pool: pools[i].pool },
                        arb_types::PoolKey { venue: pools[j].venue, pool: pools[j].pool },
                        arb_types::PoolKey { venue: pools[k].venue, pool: pools[k].pool },
                    ],
                    estimated_amount_in: arb_types::Amount8::from_raw(DEFAULT_PROBE_SIZE as i128),
                    estimated_profit: arb_types::Amount8::from_raw(0),
                    discovered_at_ns: now_ns,
                });
            }
        }
    }
    found
}

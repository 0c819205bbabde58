//! End-to-end exercises of the full collector-cache -> scanner -> optimizer
//! -> orchestrator pipeline, covering the two-hop and zero-spread boundary
//! scenarios.

use arb_engine::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use arb_engine::gas_monitor::GasMonitor;
use arb_engine::orchestrator::{resolve_route, Orchestrator, TickOutcome};
use arb_engine::scanner::scan_two_hop;
use arb_engine::tx_builder::{ChainClient, MockChainClient};
use arb_types::{AssetId, DecimalsMap, PoolId, PoolSnapshot, Venue, VenueState};
use pool_collector::PoolCache;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn weighted_snapshot(pool: u64, reserve_base: rust_decimal::Decimal, reserve_quote: rust_decimal::Decimal) -> PoolSnapshot {
    PoolSnapshot {
        venue: Venue::WeightedAmm,
        pool: PoolId(pool),
        base: AssetId(1),
        quote: AssetId(2),
        state: VenueState::Weighted {
            reserve_base,
            reserve_quote,
            weight_base: dec!(0.5),
            weight_quote: dec!(0.5),
            fee_bps: 30,
        },
        observed_at_ns: 0,
    }
}

fn orchestrator(client: Arc<dyn ChainClient>) -> Orchestrator {
    let gas_monitor = Arc::new(GasMonitor::new(100));
    gas_monitor.record_balance(1_000_000, 0);
    Orchestrator {
        breaker: Arc::new(CircuitBreaker::new(CircuitBreakerConfig {
            max_consecutive_failures: 5,
            max_cumulative_loss: 1_000_000_000,
            cooldown_ns: 1_000_000_000,
        })),
        gas_monitor,
        chain_client: client,
        gas_budget: 50_000,
        estimated_gas_cost: 10,
    }
}

#[tokio::test]
async fn diverging_two_hop_pair_is_found_sized_and_submitted() {
    let cache = PoolCache::new();
    cache.try_update(weighted_snapshot(1, dec!(100000000), dec!(100000000)));
    cache.try_update(weighted_snapshot(2, dec!(100000000), dec!(200000000)));

    let snapshots = cache.iter_snapshot();
    let opportunities = scan_two_hop(&snapshots, &DecimalsMap::new(), 0);
    assert!(!opportunities.is_empty(), "diverging prices must be flagged");

    let opportunity = &opportunities[0];
    let route = resolve_route(opportunity, &snapshots).expect("route must resolve against the cache");
    let pool_ids: Vec<u64> = opportunity.legs.iter().map(|k| k.pool.0).collect();

    let client: Arc<dyn ChainClient> = Arc::new(MockChainClient::new(pool_ids.iter().copied().collect()));
    let orch = orchestrator(client);

    let outcome = orch.run_tick(opportunity, &route, pool_ids, 0).await;
    assert!(matches!(outcome, TickOutcome::Submitted { .. }));
}

#[tokio::test]
async fn identical_prices_across_venues_produce_no_candidate() {
    let cache = PoolCache::new();
    cache.try_update(weighted_snapshot(1, dec!(100000000), dec!(100000000)));
    cache.try_update(weighted_snapshot(2, dec!(100000000), dec!(100000000)));

    let snapshots = cache.iter_snapshot();
    let opportunities = scan_two_hop(&snapshots, &DecimalsMap::new(), 0);
    assert!(opportunities.is_empty(), "zero-spread pair must not be flagged");
}

#[tokio::test]
async fn stale_pool_is_excluded_even_with_a_real_spread() {
    let cache = PoolCache::new();
    let mut stale = weighted_snapshot(1, dec!(100000000), dec!(100000000));
    stale.observed_at_ns = 0;
    let mut fresh = weighted_snapshot(2, dec!(100000000), dec!(200000000));
    fresh.observed_at_ns = 20_000_000_000;
    cache.try_update(stale);
    cache.try_update(fresh);

    let snapshots = cache.iter_snapshot();
    let now_ns = 20_000_000_000;
    let opportunities = scan_two_hop(&snapshots, &DecimalsMap::new(), now_ns);
    assert!(opportunities.is_empty(), "stale leg must gate the pair out");
}

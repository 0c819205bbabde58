use anyhow::Context;
use arb_config::EngineConfig;
use arb_engine::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use arb_engine::gas_monitor::GasMonitor;
use arb_engine::orchestrator::{resolve_route, Orchestrator};
use arb_engine::scanner::{scan_tri_hop, scan_two_hop};
use arb_engine::tx_builder::{ChainClient, MockChainClient};
use arb_types::{now_ns, AssetId, DecimalsMap};
use pool_collector::{run_collector, supervise, Heartbeat, MockPoolSource, PoolCache, PoolSource};
use std::sync::Arc;
use tracing::{info, warn};

fn decimals_from_config(config: &EngineConfig) -> DecimalsMap {
    let mut decimals = DecimalsMap::new();
    for (&asset, &count) in &config.asset_decimals {
        decimals.insert(AssetId(asset), count);
    }
    decimals
}

/// Periodically refreshes the gas monitor's cached balance. A production
/// deployment would query the wallet's on-chain balance here; until that
/// RPC call is wired in, this polls a fixed stand-in balance, the same
/// role `MockChainClient` plays for `chain_client` below.
async fn run_gas_balance_poller(gas_monitor: Arc<GasMonitor>, mock_balance: u64, poll_interval_ms: u64) {
    loop {
        gas_monitor.record_balance(mock_balance, now_ns());
        tokio::time::sleep(std::time::Duration::from_millis(poll_interval_ms)).await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    info!("starting arbitrage engine");

    let config = EngineConfig::from_env().context("loading engine configuration")?;
    config.validate().context("validating engine configuration")?;
    info!(pools = config.monitored_pools.len(), "configuration loaded");

    let cache = Arc::new(PoolCache::new());
    let decimals = decimals_from_config(&config);

    let breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig {
        max_consecutive_failures: config.cb_max_consecutive_failures,
        max_cumulative_loss: config.cb_max_cumulative_loss,
        cooldown_ns: config.cb_cooldown_ms * 1_000_000,
    }));
    let gas_monitor = Arc::new(GasMonitor::new(config.min_gas_balance));

    // The chain client is an external collaborator; a production
    // deployment would wire a real RPC-backed implementation here.
    let chain_client: Arc<dyn ChainClient> = Arc::new(MockChainClient::new(Default::default()));

    let orchestrator = Orchestrator {
        breaker,
        gas_monitor: Arc::clone(&gas_monitor),
        chain_client,
        gas_budget: config.max_gas_budget,
        estimated_gas_cost: 1,
    };

    // One heartbeat per collector task; scanning suspends once every
    // entry in here has gone quiet, since a scan over a cache no
    // collector is refreshing only produces stale, misleading opportunities.
    let heartbeats: Vec<Arc<Heartbeat>> = vec![Heartbeat::new()];

    tokio::spawn(run_gas_balance_poller(
        Arc::clone(&gas_monitor),
        config.min_gas_balance.saturating_mul(2),
        config.poll_interval_ms,
    ));

    {
        let cache = Arc::clone(&cache);
        let heartbeat = Arc::clone(&heartbeats[0]);
        let poll_interval_ms = config.poll_interval_ms;
        tokio::spawn(async move {
            supervise("primary", move || {
                let source: Arc<dyn PoolSource> = Arc::new(MockPoolSource::empty());
                run_collector("primary", source, Arc::clone(&cache), Arc::clone(&heartbeat), poll_interval_ms)
            })
            .await;
        });
    }

    info!("engine initialized, entering tick loop");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown signal received, draining in-flight work");
                break;
            }
            _ = tokio::time::sleep(std::time::Duration::from_millis(config.poll_interval_ms)) => {
                let now = now_ns();

                if heartbeats.iter().all(|h| h.is_dead(now)) {
                    warn!("all collectors are dead, suspending scan");
                    continue;
                }

                let snapshots = cache.iter_snapshot();
                let mut opportunities = scan_two_hop(&snapshots, &decimals, now);
                opportunities.extend(scan_tri_hop(&snapshots, &decimals, now));
                arb_types::sort_by_estimated_profit_desc(&mut opportunities);

                if let Some(top) = opportunities.first() {
                    if let Some(route) = resolve_route(top, &snapshots) {
                        let pool_ids = top.legs.iter().map(|k| k.pool.0).collect();
                        let outcome = orchestrator.run_tick(top, &route, pool_ids, now).await;
                        info!(?outcome, strategy = top.strategy_tag, "tick complete");
                    }
                }
            }
        }
    }

    info!("engine shut down cleanly");
    Ok(())
}

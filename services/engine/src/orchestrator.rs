//! The per-tick control flow: scan, optimize, build, dry-run, submit. At
//! most one transaction is in flight per tick; every stage transition is
//! logged so a stalled tick can be diagnosed from logs alone.

use crate::circuit_breaker::CircuitBreaker;
use crate::dispatch;
use crate::gas_monitor::GasMonitor;
use crate::optimizer::{optimize, SimLeg};
use crate::tx_builder::{build_transaction, dry_run_and_tighten, ChainClient, SignedTransaction, SubmitOutcome};
use arb_types::{Opportunity, PoolSnapshot};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Orchestrator {
    pub breaker: Arc<CircuitBreaker>,
    pub gas_monitor: Arc<GasMonitor>,
    pub chain_client: Arc<dyn ChainClient>,
    pub gas_budget: u64,
    pub estimated_gas_cost: u128,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    NoOpportunity,
    Submitted { digest: String, profit: u128 },
    Rejected { reason: String },
    BreakerOpen,
    InsufficientGasBalance,
}

impl Orchestrator {
    /// Runs exactly one tick against an already-scanned opportunity and
    /// its resolved route legs. The scan/collector stages are driven by
    /// the caller (the binary's main loop), keeping this function free of
    /// I/O so it can be tested directly.
    pub async fn run_tick(
        &self,
        opportunity: &Opportunity,
        route: &[SimLeg],
        pool_ids: Vec<u64>,
        now_ns: u64,
    ) -> TickOutcome {
        if !self.breaker.should_attempt(now_ns) {
            debug!("circuit breaker open, skipping tick");
            return TickOutcome::BreakerOpen;
        }

        match self.gas_monitor.is_sufficient(now_ns) {
            Some(true) => {}
            Some(false) | None => {
                warn!("gas balance insufficient or stale, skipping tick");
                return TickOutcome::InsufficientGasBalance;
            }
        }

        let Some((amount_in, expected_profit)) = optimize(route, u128::MAX / 2, self.estimated_gas_cost) else {
            debug!(strategy = opportunity.strategy_tag, "optimizer found no profitable size");
            return TickOutcome::NoOpportunity;
        };

        if let Err(err) = dispatch::simulate_locally(opportunity, route, amount_in, 1) {
            warn!(strategy = opportunity.strategy_tag, error = %err, "local dispatch simulation rejected the route");
            self.breaker.on_failure(0, now_ns);
            return TickOutcome::Rejected {
                reason: err.to_string(),
            };
        }

        let args = build_transaction(
            opportunity.strategy_tag,
            pool_ids,
            amount_in,
            expected_profit,
            self.gas_budget,
        );

        let Some(tightened) = dry_run_and_tighten(&*self.chain_client, args).await.unwrap_or(None) else {
            self.breaker.on_failure(0, now_ns);
            return TickOutcome::Rejected {
                reason: "dry run failed".to_string(),
            };
        };

        let signed = SignedTransaction {
            digest: format!("{}-{}-{}", opportunity.strategy_tag, amount_in, now_ns),
            args: tightened,
        };

        match self.chain_client.submit(&signed).await {
            Ok(SubmitOutcome::Executed { digest }) => {
                self.breaker.on_success();
                info!(%digest, profit = expected_profit, "submitted arbitrage transaction");
                TickOutcome::Submitted {
                    digest,
                    profit: expected_profit,
                }
            }
            Ok(SubmitOutcome::AlreadyExecuted { digest }) => {
                info!(%digest, "transaction already executed, treating as success");
                TickOutcome::Submitted {
                    digest,
                    profit: expected_profit,
                }
            }
            Ok(SubmitOutcome::Rejected { reason }) => {
                self.breaker.on_failure(expected_profit as u64, now_ns);
                TickOutcome::Rejected { reason }
            }
            Err(err) => {
                self.breaker.on_failure(expected_profit as u64, now_ns);
                TickOutcome::Rejected {
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Extracts simulation legs from the pool cache for an opportunity's route.
pub fn resolve_route(opportunity: &Opportunity, snapshots: &[PoolSnapshot]) -> Option<Vec<SimLeg>> {
    opportunity
        .legs
        .iter()
        .map(|key| {
            snapshots
                .iter()
                .find(|s| s.venue == key.venue && s.pool == key.pool)
                .map(|s| SimLeg::from_state(&s.state))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
    use crate::gas_monitor::GasMonitor;
    use crate::tx_builder::MockChainClient;
    use arb_amm::weighted::WeightedPoolState;
    use arb_types::Amount8;
    use rust_decimal_macros::dec;

    fn orchestrator(client: Arc<dyn ChainClient>) -> Orchestrator {
        let gm = Arc::new(GasMonitor::new(100));
        gm.record_balance(1000, 0);
        Orchestrator {
            breaker: Arc::new(CircuitBreaker::new(CircuitBreakerConfig {
                max_consecutive_failures: 3,
                max_cumulative_loss: 1_000_000,
                cooldown_ns: 1_000_000_000,
            })),
            gas_monitor: gm,
            chain_client: client,
            gas_budget: 50_000,
            estimated_gas_cost: 10,
        }
    }

    fn opportunity() -> Opportunity {
        Opportunity {
            strategy_tag: "arb_clob_to_weighted",
            legs: vec![],
            estimated_amount_in: Amount8::from_raw(1),
            estimated_profit: Amount8::from_raw(0),
            discovered_at_ns: 0,
        }
    }

    #[tokio::test]
    async fn profitable_route_submits_and_closes_breaker() {
        let client: Arc<dyn ChainClient> = Arc::new(MockChainClient::new([1].into_iter().collect()));
        let orch = orchestrator(client);
        // matches the "arb_clob_to_weighted" template: flash-borrow base from
        // the order book, then route it through the weighted pool, which is
        // priced 2 quote per base so the sale alone clears the flash debt.
        let route = vec![
            SimLeg::Clob(arb_amm::clob::ClobTopOfBook {
                best_bid: dec!(0.999),
                best_ask: dec!(1.001),
                bid_depth: dec!(10000000),
                ask_depth: dec!(10000000),
            }),
            SimLeg::Weighted(WeightedPoolState {
                reserve_base: dec!(100000000),
                reserve_quote: dec!(200000000),
                weight_base: dec!(0.5),
                weight_quote: dec!(0.5),
                fee_bps: 30,
            }),
        ];

        let outcome = orch.run_tick(&opportunity(), &route, vec![1], 0).await;
        assert!(matches!(outcome, TickOutcome::Submitted { .. }));
    }

    #[tokio::test]
    async fn insufficient_gas_balance_skips_tick() {
        let client: Arc<dyn ChainClient> = Arc::new(MockChainClient::new([1].into_iter().collect()));
        let mut orch = orchestrator(client);
        orch.gas_monitor = Arc::new(GasMonitor::new(100));
        let route = vec![];
        let outcome = orch.run_tick(&opportunity(), &route, vec![1], 0).await;
        assert_eq!(outcome, TickOutcome::InsufficientGasBalance);
    }

    #[tokio::test]
    async fn open_breaker_skips_tick_without_touching_gas_or_chain() {
        let client: Arc<dyn ChainClient> = Arc::new(MockChainClient::new([1].into_iter().collect()));
        let orch = orchestrator(client);
        orch.breaker.on_failure(2_000_000, 0);
        let route = vec![];
        let outcome = orch.run_tick(&opportunity(), &route, vec![1], 0).await;
        assert_eq!(outcome, TickOutcome::BreakerOpen);
    }
}

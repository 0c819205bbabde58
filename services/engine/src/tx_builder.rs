//! Transaction assembly, dry-run simulation, and submission. Signing and
//! RPC transport are named external collaborators, so this module talks to
//! them only through the `ChainClient` trait; `MockChainClient` is the
//! in-memory stand-in the orchestrator's tests exercise.

use async_trait::async_trait;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionArgs {
    pub strategy_tag: &'static str,
    pub pool_ids: Vec<u64>,
    pub amount_in: u128,
    pub min_profit: u128,
    pub gas_budget: u64,
}

/// `min_profit = max(1, 0.9 * expected_profit)`, computed with integer
/// arithmetic to avoid a floating-point rounding surprise this close to
/// the profit invariant boundary.
pub fn compute_min_profit(expected_profit: u128) -> u128 {
    let ninety_pct = (expected_profit * 9) / 10;
    ninety_pct.max(1)
}

pub fn build_transaction(
    strategy_tag: &'static str,
    pool_ids: Vec<u64>,
    amount_in: u128,
    expected_profit: u128,
    gas_budget: u64,
) -> TransactionArgs {
    TransactionArgs {
        strategy_tag,
        pool_ids,
        amount_in,
        min_profit: compute_min_profit(expected_profit),
        gas_budget,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub status: SimulationStatus,
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
    pub realized_profit: Option<u128>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Executed { digest: String },
    AlreadyExecuted { digest: String },
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    pub digest: String,
    pub args: TransactionArgs,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn simulate(&self, args: &TransactionArgs) -> anyhow::Result<SimulationOutcome>;
    async fn submit(&self, signed: &SignedTransaction) -> anyhow::Result<SubmitOutcome>;
}

/// In-memory `ChainClient` used by orchestrator tests. `profitable_pools`
/// lists pool ids whose simulated swap path always succeeds; anything else
/// simulates as a failure.
pub struct MockChainClient {
    pub profitable_pools: HashSet<u64>,
    pub executed_digests: parking_lot::Mutex<HashSet<String>>,
}

impl MockChainClient {
    pub fn new(profitable_pools: HashSet<u64>) -> Self {
        MockChainClient {
            profitable_pools,
            executed_digests: parking_lot::Mutex::new(HashSet::new()),
        }
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn simulate(&self, args: &TransactionArgs) -> anyhow::Result<SimulationOutcome> {
        let all_known = args.pool_ids.iter().all(|id| self.profitable_pools.contains(id));
        if all_known {
            Ok(SimulationOutcome {
                status: SimulationStatus::Success,
                computation_cost: 1_000,
                storage_cost: 500,
                storage_rebate: 200,
                realized_profit: Some(args.min_profit + 10),
            })
        } else {
            Ok(SimulationOutcome {
                status: SimulationStatus::Failure,
                computation_cost: 0,
                storage_cost: 0,
                storage_rebate: 0,
                realized_profit: None,
            })
        }
    }

    async fn submit(&self, signed: &SignedTransaction) -> anyhow::Result<SubmitOutcome> {
        let mut digests = self.executed_digests.lock();
        if digests.contains(&signed.digest) {
            return Ok(SubmitOutcome::AlreadyExecuted {
                digest: signed.digest.clone(),
            });
        }
        digests.insert(signed.digest.clone());
        Ok(SubmitOutcome::Executed {
            digest: signed.digest.clone(),
        })
    }
}

/// Dry-runs `args`; on success, rebuilds with a tightened `min_profit`
/// bound (90% of the realized simulated profit) before returning the
/// version to actually submit. Returns `None` if the dry run failed.
pub async fn dry_run_and_tighten(
    client: &dyn ChainClient,
    args: TransactionArgs,
) -> anyhow::Result<Option<TransactionArgs>> {
    let outcome = client.simulate(&args).await?;
    if outcome.status != SimulationStatus::Success {
        return Ok(None);
    }
    let Some(realized) = outcome.realized_profit else {
        return Ok(None);
    };
    Ok(Some(TransactionArgs {
        min_profit: compute_min_profit(realized),
        ..args
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_profit_floors_at_one_unit() {
        assert_eq!(compute_min_profit(0), 1);
        assert_eq!(compute_min_profit(1), 1);
    }

    #[test]
    fn min_profit_is_ninety_percent_of_expected() {
        assert_eq!(compute_min_profit(1000), 900);
    }

    #[tokio::test]
    async fn dry_run_tightens_bound_on_success() {
        let client = MockChainClient::new([1, 2].into_iter().collect());
        let args = build_transaction("arb_clob_to_clmm_primary", vec![1, 2], 1000, 500, 50_000);
        let tightened = dry_run_and_tighten(&client, args).await.unwrap();
        assert!(tightened.is_some());
        assert_eq!(tightened.unwrap().min_profit, compute_min_profit(510));
    }

    #[tokio::test]
    async fn dry_run_returns_none_on_failure() {
        let client = MockChainClient::new([1].into_iter().collect());
        let args = build_transaction("arb_clob_to_clmm_primary", vec![1, 2], 1000, 500, 50_000);
        assert!(dry_run_and_tighten(&client, args).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resubmitting_same_digest_is_idempotent() {
        let client = MockChainClient::new([1].into_iter().collect());
        let signed = SignedTransaction {
            digest: "digest-1".to_string(),
            args: build_transaction("arb_clob_to_clmm_primary", vec![1], 1000, 500, 50_000),
        };
        let first = client.submit(&signed).await.unwrap();
        let second = client.submit(&signed).await.unwrap();
        assert!(matches!(first, SubmitOutcome::Executed { .. }));
        assert!(matches!(second, SubmitOutcome::AlreadyExecuted { .. }));
    }
}

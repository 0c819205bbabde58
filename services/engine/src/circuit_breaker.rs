//! Three-state circuit breaker gating submission. Trips on either of two
//! independent conditions (consecutive failures or cumulative loss), and
//! records `tripped_until` as a wall-clock timestamp rather than a duration
//! recomputed from `Instant`, since the data model names that field
//! directly.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone, Copy)]
pub struct CircuitBreakerConfig {
    pub max_consecutive_failures: u32,
    pub max_cumulative_loss: u64,
    pub cooldown_ns: u64,
}

pub struct CircuitBreaker {
    state: RwLock<CircuitState>,
    config: CircuitBreakerConfig,
    consecutive_failures: AtomicU32,
    cumulative_loss: AtomicU64,
    tripped_until_ns: AtomicU64,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        CircuitBreaker {
            state: RwLock::new(CircuitState::Closed),
            config,
            consecutive_failures: AtomicU32::new(0),
            cumulative_loss: AtomicU64::new(0),
            tripped_until_ns: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> CircuitState {
        *self.state.read()
    }

    /// Call before attempting a submission. Transitions Open -> HalfOpen
    /// once `now_ns` passes `tripped_until_ns`.
    pub fn should_attempt(&self, now_ns: u64) -> bool {
        let mut state = self.state.write();
        match *state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                if now_ns >= self.tripped_until_ns.load(Ordering::SeqCst) {
                    *state = CircuitState::HalfOpen;
                    info!("circuit breaker cooldown elapsed, entering half-open");
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn on_success(&self) {
        let mut state = self.state.write();
        match *state {
            CircuitState::HalfOpen => {
                *state = CircuitState::Closed;
                self.consecutive_failures.store(0, Ordering::SeqCst);
                self.cumulative_loss.store(0, Ordering::SeqCst);
                info!("circuit breaker closed after half-open success");
            }
            CircuitState::Closed => {
                self.consecutive_failures.store(0, Ordering::SeqCst);
            }
            CircuitState::Open => {}
        }
    }

    /// `loss` is the realized loss of this attempt, 0 if the attempt
    /// simply did not execute (e.g. rejected by the optimizer gate).
    pub fn on_failure(&self, loss: u64, now_ns: u64) {
        let mut state = self.state.write();
        let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
        let cumulative = self.cumulative_loss.fetch_add(loss, Ordering::SeqCst) + loss;

        match *state {
            CircuitState::HalfOpen => {
                self.trip(&mut state, now_ns);
            }
            CircuitState::Closed => {
                if failures >= self.config.max_consecutive_failures
                    || cumulative >= self.config.max_cumulative_loss
                {
                    self.trip(&mut state, now_ns);
                }
            }
            CircuitState::Open => {}
        }
    }

    fn trip(&self, state: &mut CircuitState, now_ns: u64) {
        *state = CircuitState::Open;
        self.tripped_until_ns
            .store(now_ns + self.config.cooldown_ns, Ordering::SeqCst);
        warn!("circuit breaker tripped, cooling down");
    }

    pub fn tripped_until_ns(&self) -> u64 {
        self.tripped_until_ns.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        *self.state.write() = CircuitState::Closed;
        self.consecutive_failures.store(0, Ordering::SeqCst);
        self.cumulative_loss.store(0, Ordering::SeqCst);
        self.tripped_until_ns.store(0, Ordering::SeqCst);
    }
}

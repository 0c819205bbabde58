use arb_types::PausedError;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StrategyError {
    #[error("swap amount must be positive")]
    ZeroAmount,
    #[error("expected profit {expected} not met by actual output delta {actual}")]
    NotProfitable { expected: i128, actual: i128 },
    #[error(transparent)]
    Paused(#[from] PausedError),
    #[error("venue operation failed: {0}")]
    Venue(String),
    #[error("repayment amount exceeds borrowed amount")]
    RepaymentMismatch,
}

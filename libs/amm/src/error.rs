#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("pool has zero liquidity")]
    ZeroLiquidity,
    #[error("swap amount must be positive")]
    ZeroAmount,
    #[error("price outside representable range")]
    PriceOutOfRange,
    #[error("swap would exceed available liquidity at the current tick")]
    InsufficientLiquidity,
    #[error("arithmetic overflow during simulation")]
    Overflow,
}

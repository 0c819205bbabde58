pub mod error;
pub mod strategies;
pub mod venues;

pub use error::StrategyError;
pub use strategies::{execute_via_flash_base, execute_via_flash_swap, ExecutionEvent};

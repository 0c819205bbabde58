pub mod capability;
pub mod decimals;
pub mod fixed_point;
pub mod ids;
pub mod opportunity;
pub mod snapshot;
pub mod strategy_tag;
pub mod time;

pub use capability::{Capability, PauseSwitch, PausedError};
pub use decimals::DecimalsMap;
pub use fixed_point::{Amount8, FixedPointError};
pub use ids::{AssetId, PoolId, PoolKey, Venue};
pub use opportunity::{sort_by_estimated_profit_desc, Opportunity};
pub use snapshot::{PoolSnapshot, VenueState};
pub use strategy_tag::{lookup, lookup_by_legs, FlashSource, StrategyTemplate, STRATEGY_TABLE};
pub use time::now_ns;

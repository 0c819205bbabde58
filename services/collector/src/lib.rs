pub mod cache;
pub mod parsers;
pub mod source;
pub mod supervisor;

pub use cache::PoolCache;
pub use source::{run_collector, MockPoolSource, PoolSource};
pub use supervisor::{supervise, Heartbeat};

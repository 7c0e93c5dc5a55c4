pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod statistics;
pub mod types;

pub use error::{ErrorKind, Result, StatsError};
pub use types::{KingsStatistics, Monarch, MonarchSource, RawMonarch, Reign, RuleRecord};

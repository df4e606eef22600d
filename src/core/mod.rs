pub mod batcher;
pub mod etl;
pub mod fetcher;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod throttle;

pub use crate::domain::model::{AddressRecord, BalanceOutcome, RunReport};
pub use crate::domain::ports::{BalanceSource, ConfigProvider, Pipeline, Storage, Throttle};
pub use crate::utils::error::Result;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::rpc::SolanaRpcClient;
pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use core::{etl::EtlEngine, pipeline::BalancePipeline};
pub use domain::model::{AddressRecord, BalanceOutcome, Commitment, RunReport};
pub use utils::error::{CheckError, Result};

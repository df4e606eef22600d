pub mod cli;
pub mod toml_config;

pub const DEFAULT_INPUT_FILE: &str = "solana_addresses.txt";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_BATCH_SIZE: usize = 15;
pub const DEFAULT_BATCH_DELAY_MS: u64 = 30_000;

#[cfg(feature = "cli")]
pub use args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::*;
    use crate::adapters::rpc::MAINNET_ENDPOINT;
    use crate::core::ConfigProvider;
    use crate::domain::model::Commitment;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "sol-balance-check")]
    #[command(about = "Check SOL balances for a list of addresses and save them to CSV")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_INPUT_FILE, help = "Newline-delimited address list")]
        pub input_file: String,

        #[arg(long, default_value = MAINNET_ENDPOINT)]
        pub rpc_endpoint: String,

        #[arg(long, default_value_t = Commitment::Confirmed)]
        pub commitment: Commitment,

        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, help = "Addresses queried concurrently per batch")]
        pub batch_size: usize,

        #[arg(long, default_value_t = DEFAULT_BATCH_DELAY_MS, help = "Pause between batches in milliseconds")]
        pub batch_delay_ms: u64,

        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        #[arg(long, help = "Also write failed addresses and their errors to a separate CSV")]
        pub write_failures: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log CPU and memory usage per stage")]
        pub monitor: bool,
    }

    impl Default for CliConfig {
        fn default() -> Self {
            Self {
                input_file: DEFAULT_INPUT_FILE.to_string(),
                rpc_endpoint: MAINNET_ENDPOINT.to_string(),
                commitment: Commitment::Confirmed,
                batch_size: DEFAULT_BATCH_SIZE,
                batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
                output_path: DEFAULT_OUTPUT_PATH.to_string(),
                write_failures: false,
                verbose: false,
                monitor: false,
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn rpc_endpoint(&self) -> &str {
            &self.rpc_endpoint
        }

        fn commitment(&self) -> Commitment {
            self.commitment
        }

        fn input_file(&self) -> &str {
            &self.input_file
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn batch_size(&self) -> usize {
            self.batch_size
        }

        fn batch_delay(&self) -> Duration {
            Duration::from_millis(self.batch_delay_ms)
        }

        fn write_failures(&self) -> bool {
            self.write_failures
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("rpc_endpoint", &self.rpc_endpoint)?;
            validation::validate_path("input_file", &self.input_file)?;
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_positive_number("batch_size", self.batch_size, 1)?;
            Ok(())
        }
    }

}

use crate::adapters::rpc::SolanaRpcClient;
use crate::core::batcher::{batch_count, batches};
use crate::core::fetcher::fetch_batch;
use crate::core::loader::parse_address_list;
use crate::core::report;
use crate::core::throttle::SleepThrottle;
use crate::core::{BalanceSource, ConfigProvider, Pipeline, Storage, Throttle};
use crate::domain::model::{AddressRecord, RunReport};
use crate::utils::error::{CheckError, Result};
use chrono::Utc;
use std::path::Path;

/// Load addresses, query them batch by batch, write the CSV report.
pub struct BalancePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    source: Box<dyn BalanceSource>,
    throttle: Box<dyn Throttle>,
}

impl<S: Storage, C: ConfigProvider> BalancePipeline<S, C> {
    /// Wires the Solana RPC client and a sleeping throttle from `config`.
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = match config.request_timeout() {
            Some(timeout) => {
                SolanaRpcClient::with_timeout(config.rpc_endpoint(), config.commitment(), timeout)?
            }
            None => SolanaRpcClient::new(config.rpc_endpoint(), config.commitment()),
        };

        Ok(Self::with_components(
            storage,
            config,
            Box::new(client),
            Box::new(SleepThrottle),
        ))
    }

    pub fn with_components(
        storage: S,
        config: C,
        source: Box<dyn BalanceSource>,
        throttle: Box<dyn Throttle>,
    ) -> Self {
        Self {
            storage,
            config,
            source,
            throttle,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_file(&self, file_name: &str) -> String {
        Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BalancePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<String>> {
        let input_file = self.config.input_file();
        tracing::info!("📂 Reading addresses from: {}", input_file);

        let raw = self.storage.read_file(input_file).await?;
        let content = String::from_utf8(raw).map_err(|e| CheckError::ProcessingError {
            message: format!("{} is not valid UTF-8: {}", input_file, e),
        })?;
        let addresses = parse_address_list(&content);

        println!("Checking {} addresses...", addresses.len());
        println!(
            "Batch size: {}, Delay: {}ms\n",
            self.config.batch_size(),
            self.config.batch_delay().as_millis()
        );

        Ok(addresses)
    }

    async fn transform(&self, addresses: Vec<String>) -> Result<Vec<AddressRecord>> {
        let batch_size = self.config.batch_size();
        let delay = self.config.batch_delay();
        let total_batches = batch_count(addresses.len(), batch_size);
        let mut records = Vec::with_capacity(addresses.len());
        let mut position = 0;

        for (index, batch) in batches(&addresses, batch_size).enumerate() {
            println!(
                "Processing batch {}... ({} - {})",
                index + 1,
                position + 1,
                position + batch.len()
            );
            tracing::debug!("Batch {}/{} with {} addresses", index + 1, total_batches, batch.len());

            let batch_records = fetch_batch(self.source.as_ref(), batch).await;
            for record in &batch_records {
                println!("{}", report::progress_line(record));
            }

            position += batch.len();
            records.extend(batch_records);

            // 最後一批之後不需要等待
            if index + 1 < total_batches {
                println!("\nWaiting {} seconds...\n", delay.as_secs_f64());
                self.throttle.pause(delay).await;
            }
        }

        if records.len() != addresses.len() {
            return Err(CheckError::ProcessingError {
                message: format!(
                    "expected {} records, produced {}",
                    addresses.len(),
                    records.len()
                ),
            });
        }

        Ok(records)
    }

    async fn load(&self, records: Vec<AddressRecord>) -> Result<RunReport> {
        let timestamp = report::file_timestamp(Utc::now());
        let successful = records.iter().filter(|r| r.is_success()).count();

        let output_path = self.output_file(&report::balances_file_name(&timestamp));
        let csv_data = report::render_balances_csv(&records)?;
        self.storage.write_file(&output_path, &csv_data).await?;
        tracing::info!("💾 Wrote {} balances to {}", successful, output_path);

        let failures_path = if self.config.write_failures() {
            let path = self.output_file(&report::failures_file_name(&timestamp));
            let data = report::render_failures_csv(&records)?;
            self.storage.write_file(&path, &data).await?;
            tracing::info!("💾 Wrote {} failures to {}", records.len() - successful, path);
            Some(path)
        } else {
            None
        };

        Ok(RunReport {
            total: records.len(),
            successful,
            failed: records.len() - successful,
            output_path,
            failures_path,
        })
    }
}

use crate::domain::model::{AddressRecord, Commitment, RunReport};
use crate::domain::pubkey::Pubkey;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn rpc_endpoint(&self) -> &str;
    fn commitment(&self) -> Commitment;
    fn input_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn batch_delay(&self) -> Duration;
    fn write_failures(&self) -> bool;

    fn request_timeout(&self) -> Option<Duration> {
        None
    }
}

/// Remote ledger queried for account balances.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Returns the balance in lamports.
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64>;
}

#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, delay: Duration);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, addresses: Vec<String>) -> Result<Vec<AddressRecord>>;
    async fn load(&self, records: Vec<AddressRecord>) -> Result<RunReport>;
}

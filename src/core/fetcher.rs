use crate::core::BalanceSource;
use crate::domain::model::AddressRecord;
use crate::domain::pubkey::Pubkey;
use futures::future::join_all;

/// Queries every address of a batch concurrently and returns one record per
/// address, in the same order as `batch`.
pub async fn fetch_batch<B>(source: &B, batch: &[String]) -> Vec<AddressRecord>
where
    B: BalanceSource + ?Sized,
{
    join_all(batch.iter().map(|address| fetch_one(source, address))).await
}

/// Failures are captured in the record, never propagated.
pub async fn fetch_one<B>(source: &B, address: &str) -> AddressRecord
where
    B: BalanceSource + ?Sized,
{
    let pubkey = match address.parse::<Pubkey>() {
        Ok(pubkey) => pubkey,
        Err(e) => {
            tracing::debug!("Rejected address {}: {}", address, e);
            return AddressRecord::failure(address, e.to_string());
        }
    };

    match source.get_balance(&pubkey).await {
        Ok(lamports) => AddressRecord::success(address, lamports),
        Err(e) => {
            tracing::debug!("Balance query for {} failed: {}", address, e);
            AddressRecord::failure(address, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RecordStatus;
    use crate::utils::error::{CheckError, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    const FIRST: &str = "8inHGLHXegST3EPLcpisQe9D1hDT9r7DJjS395L3yuYf";
    const SECOND: &str = "HAMxiXdEJxiBHabZAUm8PSLvWQM2GHi5PArVZvUCeDab";
    const THIRD: &str = "24PNhTaNtomHhoy3fTRaMhAFCRj4uHqhZEEoWrKDbR5p";

    /// 以地址決定回應延遲與結果，用來驗證順序保持
    struct ScriptedSource {
        balances: HashMap<String, u64>,
        delays_ms: HashMap<String, u64>,
    }

    #[async_trait]
    impl BalanceSource for ScriptedSource {
        async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
            let key = pubkey.to_string();
            if let Some(ms) = self.delays_ms.get(&key) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.balances
                .get(&key)
                .copied()
                .ok_or(CheckError::HttpStatusError { status: 503 })
        }
    }

    fn source() -> ScriptedSource {
        ScriptedSource {
            balances: HashMap::from([
                (FIRST.to_string(), 1_000_000_000),
                (SECOND.to_string(), 42),
            ]),
            delays_ms: HashMap::from([(FIRST.to_string(), 30), (SECOND.to_string(), 5)]),
        }
    }

    #[tokio::test]
    async fn test_results_keep_input_order() {
        let batch = vec![FIRST.to_string(), SECOND.to_string()];
        let records = fetch_batch(&source(), &batch).await;

        let order: Vec<&str> = records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(order, vec![FIRST, SECOND]);
        assert_eq!(records[0].lamports(), Some(1_000_000_000));
        assert_eq!(records[1].lamports(), Some(42));
    }

    #[tokio::test]
    async fn test_parse_failure_becomes_error_record() {
        let record = fetch_one(&source(), "Addr2").await;

        assert_eq!(record.status(), RecordStatus::Error);
        assert!(record.error().unwrap().starts_with("Invalid public key input"));
    }

    #[tokio::test]
    async fn test_rpc_failure_does_not_abort_batch() {
        let batch = vec![THIRD.to_string(), "Addr2".to_string(), FIRST.to_string()];
        let records = fetch_batch(&source(), &batch).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].error(), Some("RPC endpoint returned HTTP 503"));
        assert_eq!(records[1].status(), RecordStatus::Error);
        assert_eq!(records[2].balance(), Some(1.0));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        assert!(fetch_batch(&source(), &[]).await.is_empty());
    }
}

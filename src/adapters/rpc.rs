use crate::domain::model::Commitment;
use crate::domain::ports::BalanceSource;
use crate::domain::pubkey::Pubkey;
use crate::utils::error::{CheckError, Result};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const MAINNET_ENDPOINT: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Solana JSON-RPC client, only the calls this tool needs.
pub struct SolanaRpcClient {
    // Client 內部已經是 Arc
    client: Client,
    endpoint: String,
    commitment: Commitment,
    next_id: AtomicU64,
}

impl SolanaRpcClient {
    pub fn new(endpoint: impl Into<String>, commitment: Commitment) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            commitment,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        commitment: Commitment,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            commitment,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call_rpc(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        tracing::debug!("RPC request to {}: {}", self.endpoint, request_body);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("RPC response status: {}", status);
        if !status.is_success() {
            return Err(CheckError::HttpStatusError {
                status: status.as_u16(),
            });
        }

        let mut json = response.json::<serde_json::Value>().await?;

        if json["error"].is_object() {
            let error: RpcErrorObject = serde_json::from_value(json["error"].take())?;
            return Err(CheckError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        Ok(json["result"].take())
    }
}

#[async_trait]
impl BalanceSource for SolanaRpcClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64> {
        let result = self
            .call_rpc(
                "getBalance",
                json!([pubkey.to_string(), { "commitment": self.commitment.to_string() }]),
            )
            .await?;

        // 回應格式: { "context": { "slot": n }, "value": lamports }
        result["value"]
            .as_u64()
            .ok_or_else(|| CheckError::MalformedResponseError {
                message: format!("getBalance result has no numeric value: {}", result),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const ADDRESS: &str = "8inHGLHXegST3EPLcpisQe9D1hDT9r7DJjS395L3yuYf";

    fn pubkey() -> Pubkey {
        ADDRESS.parse().unwrap()
    }

    #[tokio::test]
    async fn test_get_balance_success() {
        let server = MockServer::start();
        let rpc_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/")
                .body_contains("\"getBalance\"")
                .body_contains(ADDRESS)
                .body_contains("\"confirmed\"");
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "context": { "slot": 250_000_000u64 }, "value": 1_500_000_000u64 }
            }));
        });

        let client = SolanaRpcClient::new(server.url("/"), Commitment::Confirmed);
        let lamports = client.get_balance(&pubkey()).await.unwrap();

        rpc_mock.assert();
        assert_eq!(lamports, 1_500_000_000);
    }

    #[tokio::test]
    async fn test_get_balance_sends_configured_commitment() {
        let server = MockServer::start();
        let rpc_mock = server.mock(|when, then| {
            when.method(POST).path("/").body_contains("\"finalized\"");
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "context": { "slot": 1 }, "value": 0 }
            }));
        });

        let client = SolanaRpcClient::new(server.url("/"), Commitment::Finalized);
        assert_eq!(client.get_balance(&pubkey()).await.unwrap(), 0);
        rpc_mock.assert();
    }

    #[tokio::test]
    async fn test_get_balance_rpc_error_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32602, "message": "Invalid param: WrongSize" }
            }));
        });

        let client = SolanaRpcClient::new(server.url("/"), Commitment::Confirmed);
        let err = client.get_balance(&pubkey()).await.unwrap_err();

        match err {
            CheckError::RpcError { code, message } => {
                assert_eq!(code, -32602);
                assert_eq!(message, "Invalid param: WrongSize");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_balance_rate_limited() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(429).body("Too many requests for a specific RPC call");
        });

        let client = SolanaRpcClient::new(server.url("/"), Commitment::Confirmed);
        let err = client.get_balance(&pubkey()).await.unwrap_err();

        assert!(matches!(err, CheckError::HttpStatusError { status: 429 }));
    }

    #[tokio::test]
    async fn test_get_balance_malformed_result() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "context": { "slot": 1 } }
            }));
        });

        let client = SolanaRpcClient::new(server.url("/"), Commitment::Confirmed);
        let err = client.get_balance(&pubkey()).await.unwrap_err();

        assert!(matches!(err, CheckError::MalformedResponseError { .. }));
    }
}

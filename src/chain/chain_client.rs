//! ICON JSON-RPC v3 client with reliability features.
//!
//! Features:
//! - Automatic retry with exponential backoff on transport failures
//! - Multiple RPC endpoint fallback
//! - Request timeout and tracing of every attempt
//! - Node error objects surfaced unchanged, never retried

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};
use url::Url;

use crate::chain::errors::{ChainClientCreationError, ChainClientError};
use crate::chain::network::NetworkProfile;
use crate::chain::parsers::{parse_hex_quantity, parse_tx_hash};
use crate::chain::result_polling::{pending_as_not_found, poll_for_result};
use crate::chain::rpc::RpcClient;
use crate::core::address::Address;
use crate::core::token_amount::TokenAmount;
use crate::core::transaction::{CallPayload, SignedTransaction};
use crate::core::transaction_result::TransactionResult;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const BACKOFF_BASE_MS: u64 = 200;
const BACKOFF_CAP_MS: u64 = 5_000;

pub struct ChainClient {
    /// Endpoints tried in order
    rpc_urls: Vec<Url>,
    /// Request timeout in seconds
    timeout: u64,
    /// Retries per endpoint after the first attempt
    max_retries: u32,
    http: reqwest::Client,
    next_id: AtomicU64,
    runtime: Runtime,
}

impl ChainClient {
    /// Creates a client that tries `rpc_urls` in order.
    ///
    /// # Examples
    /// ```
    /// # use icon_sdk::chain::{ChainClient, ChainClientCreationError};
    /// let urls = vec![url::Url::parse("https://lisbon.net.solidwallet.io/api/v3").unwrap()];
    /// let client = ChainClient::new(urls, 30, 3)?;
    /// # Ok::<(), ChainClientCreationError>(())
    /// ```
    pub fn new(rpc_urls: Vec<Url>, timeout: u64, max_retries: u32) -> Result<Self, ChainClientCreationError> {
        if rpc_urls.is_empty() {
            return Err(ChainClientCreationError::NoRpcUrlsProvided);
        }

        let runtime = Runtime::new()
            .map_err(|e| ChainClientCreationError::TokioRuntimeError(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| ChainClientCreationError::HttpClient(e.to_string()))?;

        Ok(Self {
            rpc_urls,
            timeout,
            max_retries,
            http,
            next_id: AtomicU64::new(1),
            runtime,
        })
    }

    /// Client for a single profile's endpoint with default timeout and retries.
    pub fn for_network(profile: &NetworkProfile) -> Result<Self, ChainClientCreationError> {
        Self::new(vec![profile.url().clone()], DEFAULT_TIMEOUT_SECS, DEFAULT_MAX_RETRIES)
    }

    pub fn rpc_urls(&self) -> &[Url] {
        &self.rpc_urls
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Sends an arbitrary JSON-RPC request and returns its `result`.
    pub fn request(&self, method: &str, params: Option<Value>) -> Result<Value, ChainClientError> {
        self.runtime.block_on(self.request_async(method, params.as_ref()))
    }

    /// `icx_getTransactionResult`. A transaction that is not executed yet comes back
    /// as the node's pending error code.
    pub fn get_transaction_result(&self, tx_hash: &str) -> Result<TransactionResult, ChainClientError> {
        parse_tx_hash(tx_hash)?;
        self.runtime.block_on(self.fetch_transaction_result(tx_hash))
    }

    /// Polls `icx_getTransactionResult` until the transaction is executed.
    ///
    /// # Arguments
    /// * `tx_hash` - `0x` transaction hash
    /// * `timeout` - Maximum time to wait in seconds
    /// * `poll_interval` - Interval between polls in seconds
    pub fn wait_for_transaction_result(
        &self,
        tx_hash: &str,
        timeout: u64,
        poll_interval: f64,
    ) -> Result<TransactionResult, ChainClientError> {
        parse_tx_hash(tx_hash)?;
        if !poll_interval.is_finite() || poll_interval <= 0.0 {
            return Err(ChainClientError::InvalidResponse(format!(
                "poll interval must be positive, got {}",
                poll_interval
            )));
        }
        self.runtime.block_on(poll_for_result(
            move || async move { pending_as_not_found(self.fetch_transaction_result(tx_hash).await) },
            Duration::from_secs(timeout),
            Duration::from_secs_f64(poll_interval),
        ))
    }

    async fn fetch_transaction_result(&self, tx_hash: &str) -> Result<TransactionResult, ChainClientError> {
        let params = json!({ "txHash": tx_hash });
        let result = self.request_async("icx_getTransactionResult", Some(&params)).await?;
        if result.is_null() {
            return Err(ChainClientError::TransactionNotFound(tx_hash.to_string()));
        }
        TransactionResult::from_json(&result)
            .map_err(|e| ChainClientError::InvalidResponse(format!("Failed to parse transaction result: {}", e)))
    }

    async fn request_async(&self, method: &str, params: Option<&Value>) -> Result<Value, ChainClientError> {
        let mut last_error = None;

        for rpc_url in &self.rpc_urls {
            match self.request_with_retries(rpc_url, method, params).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_transport() => {
                    warn!(url = %rpc_url, method, error = %e, "endpoint failed, trying next");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(ChainClientError::all_endpoints_failed(last_error))
    }

    async fn request_with_retries(
        &self,
        rpc_url: &Url,
        method: &str,
        params: Option<&Value>,
    ) -> Result<Value, ChainClientError> {
        let mut attempt = 0;
        loop {
            match self.send_once(rpc_url, method, params).await {
                Err(e) if e.is_transport() && attempt < self.max_retries => {
                    let delay = backoff_delay(attempt);
                    warn!(url = %rpc_url, method, attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying request");
                    sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    async fn send_once(
        &self,
        rpc_url: &Url,
        method: &str,
        params: Option<&Value>,
    ) -> Result<Value, ChainClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "id": id,
        });
        if let Some(params) = params {
            body["params"] = params.clone();
        }

        debug!(url = %rpc_url, method, id, "sending request");
        let response = self
            .http
            .post(rpc_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_transport_error)?;

        // Nodes answer failed calls with a non-2xx status and a JSON-RPC error body.
        let envelope: Value = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ChainClientError::RpcError(format!("HTTP {} from {}", status, rpc_url)));
            }
            Err(e) => {
                return Err(ChainClientError::InvalidResponse(format!("Response is not JSON: {}", e)));
            }
        };

        if let Some(error) = envelope.get("error").filter(|e| !e.is_null()) {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ChainClientError::RemoteRpcError { code, message });
        }
        if !status.is_success() {
            return Err(ChainClientError::RpcError(format!("HTTP {} from {}", status, rpc_url)));
        }

        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| ChainClientError::InvalidResponse("Response has neither result nor error".to_string()))
    }
}

impl RpcClient for ChainClient {
    fn get_balance(&self, address: &Address) -> Result<TokenAmount, ChainClientError> {
        let params = json!({ "address": address });
        let result = self.request("icx_getBalance", Some(params))?;
        Ok(TokenAmount::native_icx(parse_hex_quantity(&result)?))
    }

    fn call(&self, payload: &CallPayload) -> Result<Value, ChainClientError> {
        let params = serde_json::to_value(payload)
            .map_err(|e| ChainClientError::RpcError(format!("Failed to encode call: {}", e)))?;
        self.request("icx_call", Some(params))
    }

    fn send_transaction(&self, tx: &SignedTransaction) -> Result<String, ChainClientError> {
        let params = tx
            .to_json()
            .map_err(|e| ChainClientError::RpcError(format!("Failed to encode transaction: {}", e)))?;
        let result = self.request("icx_sendTransaction", Some(params))?;
        let hash = result
            .as_str()
            .ok_or_else(|| ChainClientError::InvalidResponse(format!("Expected a transaction hash, got {}", result)))?;
        parse_tx_hash(hash)?;
        Ok(hash.to_string())
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let factor = 1u64 << attempt.min(16);
    Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(factor).min(BACKOFF_CAP_MS))
}

fn classify_transport_error(e: reqwest::Error) -> ChainClientError {
    if e.is_timeout() {
        ChainClientError::TimeoutError(e.to_string())
    } else {
        ChainClientError::NetworkError(e.to_string())
    }
}

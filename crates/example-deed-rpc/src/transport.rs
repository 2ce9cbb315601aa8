// crates/example-deed-rpc/src/transport.rs
// ============================================================================
// Module: JSON-RPC Transport
// Description: Blocking JSON-RPC 2.0 over HTTP with hard response limits.
// Purpose: Issue node requests and wait for transaction receipts.
// Dependencies: reqwest, serde_json, url, alloy-primitives
// ============================================================================

//! ## Overview
//! [`JsonRpcTransport`] posts JSON-RPC 2.0 envelopes to a single node
//! endpoint. Redirects are disabled, requests time out, and response bodies
//! larger than the configured limit are rejected before parsing.
//!
//! Request ids come from a monotonic counter so concurrent callers never
//! share an id.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use alloy_primitives::Address;
use alloy_primitives::B256;
use alloy_primitives::U64;
use example_deed_config::ClientConfig;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// User agent sent with every request.
const USER_AGENT: &str = concat!("example-deed/", env!("CARGO_PKG_VERSION"));
/// JSON-RPC protocol version.
const JSONRPC_VERSION: &str = "2.0";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level JSON-RPC failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Endpoint URL or client setup is invalid.
    #[error("rpc setup error: {0}")]
    Setup(String),
    /// Request could not be delivered.
    #[error("rpc http error: {0}")]
    Http(String),
    /// Node answered with a non-success HTTP status.
    #[error("rpc http status {0}")]
    Status(u16),
    /// Response body exceeds the configured limit.
    #[error("rpc response exceeds size limit")]
    ResponseTooLarge,
    /// Response body is not a valid JSON-RPC payload.
    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
    /// Node returned a JSON-RPC error object.
    #[error("node error {code}: {message}")]
    Node {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
        /// Hex-encoded error data, when present.
        data: Option<String>,
    },
    /// No receipt arrived before the deadline.
    #[error("timed out waiting for receipt of {0}")]
    ReceiptTimeout(B256),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Transaction receipt fields used by the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    /// Transaction hash.
    pub transaction_hash: B256,
    /// Block number that included the transaction.
    #[serde(default)]
    pub block_number: Option<U64>,
    /// Gas consumed by the transaction.
    #[serde(default)]
    pub gas_used: Option<U64>,
    /// Execution status (`1` success, `0` reverted), when reported.
    #[serde(default)]
    pub status: Option<U64>,
    /// Address of a newly deployed contract.
    #[serde(default)]
    pub contract_address: Option<Address>,
}

impl RpcReceipt {
    /// Returns true when the node reports a failed execution.
    #[must_use]
    pub fn is_reverted(&self) -> bool {
        self.status.is_some_and(|status| status.is_zero())
    }
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    /// Error code.
    code: i64,
    /// Error message.
    message: String,
    /// Optional error data.
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    /// Successful result.
    #[serde(default)]
    result: Option<Value>,
    /// Error object.
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// Blocking JSON-RPC client for one node endpoint.
///
/// # Invariants
/// - Response bodies never exceed `max_response_bytes`.
/// - Request ids are unique per transport instance.
#[derive(Debug)]
pub struct JsonRpcTransport {
    /// HTTP client.
    client: Client,
    /// Node endpoint.
    endpoint: Url,
    /// Response size limit in bytes.
    max_response_bytes: usize,
    /// Delay between receipt polls.
    poll_interval: Duration,
    /// Maximum time to wait for a receipt.
    receipt_timeout: Duration,
    /// Next request id.
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    /// Builds a transport for `endpoint` using client limits from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Setup`] when the endpoint is not an HTTP(S) URL or
    /// the client cannot be built.
    pub fn new(endpoint: &str, config: &ClientConfig) -> Result<Self, RpcError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| RpcError::Setup(format!("invalid url: {err}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RpcError::Setup("endpoint must use http or https".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|_| RpcError::Setup("http client build failed".to_string()))?;
        Ok(Self {
            client,
            endpoint,
            max_response_bytes: config.max_response_bytes,
            poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
            receipt_timeout: Duration::from_millis(config.receipt_timeout_ms),
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the node endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one JSON-RPC request and returns its `result` value.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] for delivery failures, oversized or malformed
    /// responses, and node error objects.
    pub fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": id,
            "method": method,
            "params": params,
        });
        let payload = serde_json::to_vec(&body)
            .map_err(|err| RpcError::InvalidResponse(format!("request encoding failed: {err}")))?;
        let mut response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .map_err(|err| RpcError::Http(err.without_url().to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status(status.as_u16()));
        }
        let bytes = read_response_limited(&mut response, self.max_response_bytes)?;
        let envelope: RpcResponse = serde_json::from_slice(&bytes)
            .map_err(|err| RpcError::InvalidResponse(err.to_string()))?;
        if let Some(error) = envelope.error {
            return Err(RpcError::Node {
                code: error.code,
                message: error.message,
                data: error.data.and_then(error_data_hex),
            });
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    /// Sends a request and deserializes its result into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::InvalidResponse`] when the result has the wrong shape.
    pub fn request_typed<T>(&self, method: &str, params: Value) -> Result<T, RpcError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = self.request(method, params)?;
        serde_json::from_value(value)
            .map_err(|err| RpcError::InvalidResponse(format!("{method}: {err}")))
    }

    /// Submits a transaction and waits for its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] when submission fails or no receipt arrives in time.
    pub fn send_transaction(&self, transaction: Value) -> Result<RpcReceipt, RpcError> {
        let tx_hash: B256 = self.request_typed("eth_sendTransaction", json!([transaction]))?;
        self.wait_for_receipt(tx_hash)
    }

    /// Polls `eth_getTransactionReceipt` until a receipt is available.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::ReceiptTimeout`] when the deadline passes.
    pub fn wait_for_receipt(&self, tx_hash: B256) -> Result<RpcReceipt, RpcError> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            let receipt: Option<RpcReceipt> =
                self.request_typed("eth_getTransactionReceipt", json!([tx_hash]))?;
            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            if Instant::now() >= deadline {
                return Err(RpcError::ReceiptTimeout(tx_hash));
            }
            thread::sleep(self.poll_interval);
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a maximum size.
fn read_response_limited(
    response: &mut reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, RpcError> {
    let expected_len = response.content_length();
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| RpcError::Setup("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err(RpcError::ResponseTooLarge);
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle
        .read_to_end(&mut buf)
        .map_err(|_| RpcError::Http("failed to read response".to_string()))?;
    if buf.len() > max_bytes {
        return Err(RpcError::ResponseTooLarge);
    }
    if let Some(expected) = expected_len {
        let expected = usize::try_from(expected)
            .map_err(|_| RpcError::InvalidResponse("invalid response length".to_string()))?;
        if buf.len() < expected {
            return Err(RpcError::InvalidResponse("response truncated".to_string()));
        }
    }
    Ok(buf)
}

/// Extracts hex revert data from a JSON-RPC error `data` field.
///
/// Nodes report either a bare hex string or an object carrying `data`.
fn error_data_hex(value: Value) -> Option<String> {
    match value {
        Value::String(text) if text.starts_with("0x") => Some(text),
        Value::Object(mut map) => map.remove("data").and_then(error_data_hex),
        _ => None,
    }
}

//! JSON-RPC 2.0 envelope and Ethereum call parameters.
//!
//! The browser client and the server proxy exchange these shapes verbatim,
//! so field names follow the Ethereum JSON-RPC wire format.

#[cfg(test)]
#[path = "rpc_test.rs"]
mod rpc_test;

use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC error codes used by the proxy.
pub const CODE_INVALID_REQUEST: i64 = -32600;
pub const CODE_METHOD_NOT_FOUND: i64 = -32601;
pub const CODE_INTERNAL_ERROR: i64 = -32603;
/// Code nodes use for `eth_call` reverts that carry revert data.
pub const CODE_EXECUTION_REVERTED: i64 = 3;

/// Methods the server proxy forwards. Nothing here mutates chain state.
pub const READ_METHODS: &[&str] = &[
    "eth_call",
    "eth_chainId",
    "eth_blockNumber",
    "eth_estimateGas",
    "eth_gasPrice",
    "eth_getTransactionReceipt",
    "net_version",
];

#[must_use]
pub fn is_read_method(method: &str) -> bool {
    READ_METHODS.contains(&method)
}

/// Outbound request envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    #[must_use]
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_owned(), id: Value::from(id), method: method.to_owned(), params }
    }
}

/// Error member of a failed response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    /// Hex payload carried in `data`, if any. Some nodes nest it as
    /// `{"data": "0x..."}`.
    #[must_use]
    pub fn data_hex(&self) -> Option<&str> {
        match self.data.as_ref()? {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("data").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Inbound response envelope. Exactly one of `result`/`error` is set by a
/// conforming node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_owned(), id, result: Some(result), error: None }
    }

    #[must_use]
    pub fn failure(id: Value, error: RpcErrorObject) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_owned(), id, result: None, error: Some(error) }
    }

    /// Collapse the envelope into its payload. A response with neither
    /// member yields `Ok(Value::Null)`.
    ///
    /// # Errors
    ///
    /// Returns the node's error object when `error` is present.
    pub fn into_result(self) -> Result<Value, RpcErrorObject> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Transaction-call object used by `eth_call`, `eth_estimateGas` and
/// `eth_sendTransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
}

/// Transaction object for `eth_sendTransaction`. `chainId` pins the network
/// the wallet signs for, so a wallet on another chain refuses it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    #[serde(serialize_with = "serialize_quantity")]
    pub chain_id: u64,
}

/// Hex quantity form of `value`, e.g. `0xaa36a7`.
#[must_use]
pub fn format_quantity(value: u64) -> String {
    format!("{value:#x}")
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_quantity<S: serde::Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_quantity(*value))
}

/// Parse a hex quantity such as `"0xaa36a7"`.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<u64> {
    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

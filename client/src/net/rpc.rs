//! RPC client provider: read-only and wallet-backed chain clients.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PublicClient` speaks JSON-RPC to the configured endpoint (the server's
//! `/api/rpc` proxy in production). `WalletClient` exists only when a browser
//! wallet is injected and routes signing requests through it.
//!
//! Client-side (hydrate): `HttpTransport` posts with `gloo-net` and bounds
//! every round trip with a `gloo-timers` timeout so a hung node cannot leave
//! the UI busy forever. Server-side (SSR): the transport is a stub that
//! reports itself unavailable.

#[cfg(test)]
#[path = "rpc_test.rs"]
mod rpc_test;

use std::cell::Cell;

use async_trait::async_trait;
use chain::{
    Address, B256, Bytes, CallRequest, ChainConfig, RpcErrorObject, RpcRequest, RpcResponse, TransactionRequest,
};
use serde_json::{Value, json};

use super::provider::{self, ETH_SEND_TRANSACTION, ProviderError, WalletProvider};

/// Errors produced by the read-only RPC path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RpcError {
    /// The HTTP request never completed.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("rpc endpoint returned HTTP {0}")]
    Status(u16),

    /// The response body is not the JSON shape we expect.
    #[error("malformed rpc response: {0}")]
    Malformed(String),

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String, data: Option<String> },

    /// No response arrived within the configured budget.
    #[error("rpc request timed out after {0} ms")]
    Timeout(u64),

    /// Called outside the browser.
    #[error("rpc transport is not available on the server")]
    Unavailable,
}

impl From<RpcErrorObject> for RpcError {
    fn from(err: RpcErrorObject) -> Self {
        let data = err.data_hex().map(str::to_owned);
        Self::Rpc { code: err.code, message: err.message, data }
    }
}

/// Sends one JSON-RPC envelope and returns the raw response envelope.
#[async_trait(?Send)]
pub trait RpcTransport {
    /// # Errors
    ///
    /// Returns an [`RpcError`] on transport, status, timeout or decode failure.
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError>;
}

/// HTTP JSON-RPC transport.
pub struct HttpTransport {
    url: String,
    timeout_ms: u64,
}

impl HttpTransport {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Self {
        Self { url: url.into(), timeout_ms }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    #[cfg(feature = "hydrate")]
    async fn post(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        let resp = gloo_net::http::Request::post(&self.url)
            .json(request)
            .map_err(|e| RpcError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(RpcError::Status(resp.status()));
        }
        resp.json::<RpcResponse>()
            .await
            .map_err(|e| RpcError::Malformed(e.to_string()))
    }
}

#[async_trait(?Send)]
impl RpcTransport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        #[cfg(feature = "hydrate")]
        {
            with_timeout(self.post(request), self.timeout_ms).await?
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(RpcError::Unavailable)
        }
    }
}

/// Race `fut` against a timer.
#[cfg(feature = "hydrate")]
async fn with_timeout<F: std::future::Future>(fut: F, timeout_ms: u64) -> Result<F::Output, RpcError> {
    use futures::future::{Either, select};

    let timer = gloo_timers::future::TimeoutFuture::new(u32::try_from(timeout_ms).unwrap_or(u32::MAX));
    futures::pin_mut!(fut, timer);
    match select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(RpcError::Timeout(timeout_ms)),
    }
}

/// Read-only client bound to one chain.
pub struct PublicClient<T> {
    transport: T,
    chain_id: u64,
    next_id: Cell<u64>,
}

impl<T: RpcTransport> PublicClient<T> {
    #[must_use]
    pub fn new(transport: T, chain_id: u64) -> Self {
        Self { transport, chain_id, next_id: Cell::new(1) }
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one JSON-RPC call and unwrap its result.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Rpc`] when the node answers with an error object,
    /// or the transport's error.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        let response = self.transport.send(&RpcRequest::new(id, method, params)).await?;
        response.into_result().map_err(RpcError::from)
    }

    /// `eth_call` against the latest block; returns the raw return data.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Malformed`] when the result is not hex.
    pub async fn call(&self, call: &CallRequest) -> Result<Bytes, RpcError> {
        let value = self.request("eth_call", json!([call, "latest"])).await?;
        let raw = value
            .as_str()
            .ok_or_else(|| RpcError::Malformed(format!("eth_call result is not a string: {value}")))?;
        chain::abi::decode_hex(raw).map_err(|e| RpcError::Malformed(e.to_string()))
    }

    /// Chain id reported by the node.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::Malformed`] for a non-quantity result.
    pub async fn remote_chain_id(&self) -> Result<u64, RpcError> {
        let value = self.request("eth_chainId", json!([])).await?;
        value
            .as_str()
            .and_then(chain::rpc::parse_quantity)
            .ok_or_else(|| RpcError::Malformed(format!("invalid chain id {value}")))
    }
}

/// Client that signs and broadcasts through the injected wallet.
pub struct WalletClient<P> {
    provider: P,
    chain_id: u64,
}

impl<P: WalletProvider> WalletClient<P> {
    #[must_use]
    pub fn new(provider: P, chain_id: u64) -> Self {
        Self { provider, chain_id }
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[cfg(test)]
    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    /// Chain the wallet is pointed at right now.
    ///
    /// # Errors
    ///
    /// Propagates provider failures and malformed responses.
    pub async fn wallet_chain_id(&self) -> Result<u64, ProviderError> {
        provider::chain_id(&self.provider).await
    }

    /// Ask the wallet to sign and broadcast `tx` from `tx.from`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UserRejected`] if the user declines, or
    /// [`ProviderError::Malformed`] if the wallet returns a non-hash value.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ProviderError> {
        let value = self.provider.request(ETH_SEND_TRANSACTION, json!([tx])).await?;
        value
            .as_str()
            .and_then(|s| s.parse::<B256>().ok())
            .ok_or_else(|| ProviderError::Malformed(format!("invalid transaction hash {value}")))
    }
}

/// Read-only client for `config`.
#[must_use]
pub fn public_client(config: &ChainConfig) -> PublicClient<HttpTransport> {
    PublicClient::new(HttpTransport::new(config.rpc_url.clone(), config.rpc_timeout_ms), config.chain_id)
}

/// Wallet-backed client, present only when a browser wallet is injected.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn wallet_client(config: &ChainConfig) -> Option<WalletClient<super::provider::InjectedProvider>> {
    super::provider::InjectedProvider::detect().map(|provider| WalletClient::new(provider, config.chain_id))
}

/// Sender-less call object for `to`.
#[must_use]
pub fn read_call(to: Address, data: Bytes) -> CallRequest {
    CallRequest { from: None, to, data }
}

//! Read-only JSON-RPC proxy to the upstream node.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to `/api/rpc`; this service validates each request and
//! forwards it to the configured upstream so the upstream URL (and any API
//! key embedded in it) stays on the server.
//!
//! DESIGN
//! ======
//! Only methods on the read allowlist are forwarded. Everything else is
//! answered locally with `-32601` without contacting the upstream. Signing
//! goes through the browser wallet, never through this proxy.
//!
//! The page is served from the same origin, so the proxy sends no CORS
//! headers and only accepts `application/json` bodies. A cross-site form or
//! `text/plain` post cannot reach the upstream without a preflight the
//! server never approves.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses and undecodable bodies from the
//! upstream all become `-32603` errors served with HTTP 502.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode, header};
use chain::rpc::{CODE_INTERNAL_ERROR, CODE_INVALID_REQUEST, CODE_METHOD_NOT_FOUND, JSONRPC_VERSION, is_read_method, parse_quantity};
use chain::{RpcErrorObject, RpcRequest, RpcResponse};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("expected an application/json request body")]
    NotJson,

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("upstream response malformed: {0}")]
    UpstreamBody(String),

    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
}

impl ProxyError {
    /// HTTP status to serve this error with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotJson => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MethodNotAllowed(_) => StatusCode::OK,
            Self::Upstream(_) | Self::UpstreamStatus(_) | Self::UpstreamBody(_) => StatusCode::BAD_GATEWAY,
            Self::HttpClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON-RPC error object for the response body.
    #[must_use]
    pub fn to_rpc_error(&self) -> RpcErrorObject {
        match self {
            Self::InvalidRequest(_) | Self::NotJson => RpcErrorObject::new(CODE_INVALID_REQUEST, self.to_string()),
            Self::MethodNotAllowed(method) => {
                RpcErrorObject::new(CODE_METHOD_NOT_FOUND, format!("method not allowed: {method}"))
            }
            // Upstream details may include the provider URL.
            _ => RpcErrorObject::new(CODE_INTERNAL_ERROR, "upstream rpc unavailable"),
        }
    }
}

// =============================================================================
// UPSTREAM TRAIT
// =============================================================================

/// Forwards one JSON-RPC request to a node. Enables mocking in tests.
#[async_trait::async_trait]
pub trait UpstreamRpc: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`ProxyError`] when the upstream cannot be reached or its
    /// response is not a JSON-RPC envelope.
    async fn forward(&self, request: &RpcRequest) -> Result<RpcResponse, ProxyError>;
}

/// `reqwest`-backed upstream.
pub struct HttpUpstream {
    http: reqwest::Client,
    url: String,
}

impl HttpUpstream {
    /// # Errors
    ///
    /// Returns [`ProxyError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(url: String, timeout: Duration, connect_timeout: Duration) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ProxyError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url })
    }
}

#[async_trait::async_trait]
impl UpstreamRpc for HttpUpstream {
    async fn forward(&self, request: &RpcRequest) -> Result<RpcResponse, ProxyError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }
        response
            .json::<RpcResponse>()
            .await
            .map_err(|e| ProxyError::UpstreamBody(e.without_url().to_string()))
    }
}

// =============================================================================
// PROXY
// =============================================================================

/// Require a JSON content type (parameters such as `charset` allowed).
///
/// # Errors
///
/// Returns [`ProxyError::NotJson`] for a missing or different content type.
pub fn require_json(headers: &HeaderMap) -> Result<(), ProxyError> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
    if is_json { Ok(()) } else { Err(ProxyError::NotJson) }
}

/// Parse and validate a raw request body.
///
/// # Errors
///
/// Returns [`ProxyError::InvalidRequest`] for non-JSON bodies, batches, or
/// envelopes that are not JSON-RPC 2.0.
pub fn parse_request(body: &[u8]) -> Result<RpcRequest, ProxyError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ProxyError::InvalidRequest(e.to_string()))?;
    if value.is_array() {
        return Err(ProxyError::InvalidRequest("batch requests are not supported".into()));
    }
    let request: RpcRequest =
        serde_json::from_value(value).map_err(|e| ProxyError::InvalidRequest(e.to_string()))?;
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(ProxyError::InvalidRequest(format!("unsupported jsonrpc version '{}'", request.jsonrpc)));
    }
    Ok(request)
}

/// Forward `request` if its method is on the read allowlist.
///
/// # Errors
///
/// Returns [`ProxyError::MethodNotAllowed`] without contacting the upstream
/// for any other method, or the upstream's error.
pub async fn proxy(upstream: &dyn UpstreamRpc, request: &RpcRequest) -> Result<RpcResponse, ProxyError> {
    if !is_read_method(&request.method) {
        tracing::warn!(method = %request.method, "rpc proxy: refused method");
        return Err(ProxyError::MethodNotAllowed(request.method.clone()));
    }
    tracing::debug!(method = %request.method, "rpc proxy: forwarding");
    let result = upstream.forward(request).await;
    if let Err(e) = &result {
        tracing::warn!(method = %request.method, error = %e, "rpc proxy: upstream failed");
    }
    result
}

/// Ask the upstream for its chain id and compare it with the configured one.
/// Returns the upstream chain id when it answered.
pub async fn check_upstream_chain(upstream: &dyn UpstreamRpc, expected: u64) -> Option<u64> {
    let request = RpcRequest::new(0, "eth_chainId", json!([]));
    let actual = match upstream.forward(&request).await.map(RpcResponse::into_result) {
        Ok(Ok(value)) => value.as_str().and_then(parse_quantity),
        Ok(Err(err)) => {
            tracing::warn!(code = err.code, message = %err.message, "upstream rejected eth_chainId");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "upstream unreachable at startup");
            None
        }
    };
    match actual {
        Some(id) if id == expected => tracing::info!(chain_id = id, "upstream chain id verified"),
        Some(id) => tracing::warn!(expected, actual = id, "upstream chain id does not match CHAIN_ID"),
        None => {}
    }
    actual
}

#[cfg(test)]
#[path = "rpc_proxy_test.rs"]
mod tests;

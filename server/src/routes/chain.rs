//! Chain configuration and JSON-RPC proxy routes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use chain::{ChainConfig, RpcResponse};
use serde_json::Value;

use crate::services::rpc_proxy::{self, parse_request, require_json};
use crate::state::AppState;

/// `GET /api/chain/config`: public chain settings for the browser.
pub async fn chain_config(State(state): State<AppState>) -> Json<ChainConfig> {
    Json(state.chain.as_ref().clone())
}

/// `POST /api/rpc`: forward an allowlisted read request upstream.
pub async fn rpc(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> (StatusCode, Json<RpcResponse>) {
    let request = match require_json(&headers).and_then(|()| parse_request(&body)) {
        Ok(request) => request,
        Err(e) => return (e.status(), Json(RpcResponse::failure(Value::Null, e.to_rpc_error()))),
    };
    match rpc_proxy::proxy(state.upstream.as_ref(), &request).await {
        Ok(response) => (StatusCode::OK, Json(response)),
        Err(e) => (e.status(), Json(RpcResponse::failure(request.id, e.to_rpc_error()))),
    }
}

#[cfg(test)]
#[path = "chain_test.rs"]
mod tests;

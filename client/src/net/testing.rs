//! Scripted wallet and RPC doubles shared by client unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use alloy_sol_types::SolValue;
use async_trait::async_trait;
use chain::{RpcErrorObject, RpcRequest, RpcResponse};
use serde_json::Value;

use super::provider::{ProviderError, WalletProvider};
use super::rpc::{RpcError, RpcTransport};

/// Wallet that answers each method from a per-method reply queue.
#[derive(Default)]
pub(crate) struct ScriptedWallet {
    replies: RefCell<HashMap<String, VecDeque<Result<Value, ProviderError>>>>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl ScriptedWallet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, method: &str, result: Result<Value, ProviderError>) -> Self {
        self.replies.borrow_mut().entry(method.to_owned()).or_default().push_back(result);
        self
    }

    pub(crate) fn methods(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl WalletProvider for ScriptedWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.borrow_mut().push((method.to_owned(), params));
        self.replies
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ProviderError::Rpc { code: -32601, message: format!("unscripted {method}") }))
    }
}

/// Transport that replays queued responses in order and records requests.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<RpcResponse, RpcError>>>,
    requests: RefCell<Vec<RpcRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn result(self, value: Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(RpcResponse::success(Value::Null, value)));
        self
    }

    pub(crate) fn error(self, error: RpcErrorObject) -> Self {
        self.replies.borrow_mut().push_back(Ok(RpcResponse::failure(Value::Null, error)));
        self
    }

    pub(crate) fn fail(self, error: RpcError) -> Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<RpcRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl RpcTransport for ScriptedTransport {
    async fn send(&self, request: &RpcRequest) -> Result<RpcResponse, RpcError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RpcError::Transport("no scripted reply".to_owned())))
    }
}

/// ABI return data for a single `string`.
pub(crate) fn encoded_string(s: &str) -> String {
    chain::hex::encode_prefixed((s.to_owned(),).abi_encode_params())
}

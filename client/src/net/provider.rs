//! Injected wallet provider (EIP-1193) bridge.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser wallets expose `window.ethereum.request({ method, params })`.
//! `WalletProvider` is the seam the connection manager and the wallet-backed
//! client talk to; `InjectedProvider` is the browser implementation and tests
//! substitute scripted providers.
//!
//! ERROR HANDLING
//! ==============
//! Rejected promises are mapped by their EIP-1193 `code`, so a user closing
//! the wallet prompt (4001) is distinguishable from a provider failure.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use async_trait::async_trait;
use chain::Address;
use serde_json::Value;

pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors surfaced by an injected wallet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The user dismissed or denied the wallet prompt.
    #[error("user rejected the request")]
    UserRejected,

    /// The wallet rejected the request with an EIP-1193 error.
    #[error("wallet error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The wallet answered with a payload of the wrong shape.
    #[error("unexpected wallet response: {0}")]
    Malformed(String),

    /// The JS bridge itself failed (missing `request`, non-promise result, ...).
    #[error("wallet bridge failed: {0}")]
    Bridge(String),
}

impl ProviderError {
    /// Classify an EIP-1193 error by code.
    #[must_use]
    pub fn from_code(code: i64, message: String) -> Self {
        if code == USER_REJECTED_CODE { Self::UserRejected } else { Self::Rpc { code, message } }
    }
}

/// Minimal EIP-1193 surface.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Forward one `request({ method, params })` call to the wallet.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the wallet rejects the request or the
    /// bridge cannot reach it.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

/// Parse an account list (`["0xabc...", ...]`) returned by the wallet.
///
/// # Errors
///
/// Returns [`ProviderError::Malformed`] when the value is not an array of
/// address strings.
pub fn parse_accounts(value: &Value) -> Result<Vec<Address>, ProviderError> {
    let items = value
        .as_array()
        .ok_or_else(|| ProviderError::Malformed(format!("expected account array, got {value}")))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .and_then(|s| s.parse::<Address>().ok())
                .ok_or_else(|| ProviderError::Malformed(format!("invalid account entry {item}")))
        })
        .collect()
}

/// Accounts the site is already authorized for. Never prompts.
///
/// # Errors
///
/// Propagates provider failures and malformed responses.
pub async fn accounts(provider: &dyn WalletProvider) -> Result<Vec<Address>, ProviderError> {
    let value = provider.request(ETH_ACCOUNTS, Value::Array(Vec::new())).await?;
    parse_accounts(&value)
}

/// Ask the user to authorize the site. Suspends until the wallet prompt is
/// answered.
///
/// # Errors
///
/// Returns [`ProviderError::UserRejected`] when the user declines.
pub async fn request_accounts(provider: &dyn WalletProvider) -> Result<Vec<Address>, ProviderError> {
    let value = provider.request(ETH_REQUEST_ACCOUNTS, Value::Array(Vec::new())).await?;
    parse_accounts(&value)
}

/// Chain id the wallet is currently pointed at.
///
/// # Errors
///
/// Returns [`ProviderError::Malformed`] for a non-quantity response.
pub async fn chain_id(provider: &dyn WalletProvider) -> Result<u64, ProviderError> {
    let value = provider.request(ETH_CHAIN_ID, Value::Array(Vec::new())).await?;
    value
        .as_str()
        .and_then(chain::rpc::parse_quantity)
        .ok_or_else(|| ProviderError::Malformed(format!("invalid chain id {value}")))
}

#[cfg(feature = "hydrate")]
pub use self::injected::InjectedProvider;

#[cfg(feature = "hydrate")]
mod injected {
    use async_trait::async_trait;
    use serde_json::Value;
    use wasm_bindgen::{JsCast as _, JsValue};

    use super::{ProviderError, WalletProvider};

    /// `window.ethereum`, when a wallet extension injected one.
    pub struct InjectedProvider {
        ethereum: js_sys::Object,
    }

    impl InjectedProvider {
        /// Look up the injected provider. Returns `None` when no wallet is installed.
        pub fn detect() -> Option<Self> {
            let window = web_sys::window()?;
            let value = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
            if value.is_undefined() || value.is_null() {
                return None;
            }
            value.dyn_into::<js_sys::Object>().ok().map(|ethereum| Self { ethereum })
        }
    }

    #[async_trait(?Send)]
    impl WalletProvider for InjectedProvider {
        async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
            let args = js_sys::Object::new();
            js_sys::Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
                .map_err(bridge_error)?;
            if !params.is_null() {
                let params_js = js_sys::JSON::parse(&params.to_string()).map_err(bridge_error)?;
                js_sys::Reflect::set(&args, &JsValue::from_str("params"), &params_js).map_err(bridge_error)?;
            }

            let request_fn = js_sys::Reflect::get(&self.ethereum, &JsValue::from_str("request"))
                .map_err(bridge_error)?
                .dyn_into::<js_sys::Function>()
                .map_err(|_| ProviderError::Bridge("provider has no request()".to_owned()))?;
            let promise = request_fn
                .call1(&self.ethereum, &args)
                .map_err(rejection)?
                .dyn_into::<js_sys::Promise>()
                .map_err(|_| ProviderError::Bridge("request() did not return a promise".to_owned()))?;

            let result = wasm_bindgen_futures::JsFuture::from(promise).await.map_err(rejection)?;
            if result.is_undefined() || result.is_null() {
                return Ok(Value::Null);
            }
            let text = String::from(js_sys::JSON::stringify(&result).map_err(bridge_error)?);
            serde_json::from_str(&text).map_err(|e| ProviderError::Malformed(e.to_string()))
        }
    }

    fn bridge_error(err: JsValue) -> ProviderError {
        ProviderError::Bridge(format!("{err:?}"))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rejection(err: JsValue) -> ProviderError {
        let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
            .ok()
            .and_then(|v| v.as_f64());
        let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| format!("{err:?}"));
        match code {
            Some(code) => ProviderError::from_code(code as i64, message),
            None => ProviderError::Bridge(message),
        }
    }
}

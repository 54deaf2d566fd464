//! Server configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Values are read through a lookup function so parsing can be tested with a
//! plain map instead of mutating the process environment. `from_env` is the
//! only caller that touches `std::env`.

use std::time::Duration;

pub use chain::ConfigError;
use chain::config::{DEFAULT_CHAIN_NAME, DEFAULT_RPC_TIMEOUT_MS, RPC_PROXY_PATH, SEPOLIA_CHAIN_ID, parse_address, parse_chain_id};
use chain::{ChainConfig, WriteMode};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = DEFAULT_RPC_TIMEOUT_MS / 1000;
pub const RPC_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Upstream JSON-RPC endpoint. Often embeds a provider API key, so it is
    /// never sent to the browser.
    pub upstream_rpc_url: String,
    pub rpc_timeout: Duration,
    /// Public view handed to the browser.
    pub chain: ChainConfig,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `RPC_URL`: upstream JSON-RPC endpoint
    /// - `CONTRACT_ADDRESS`: deployed `StringStore` address
    ///
    /// Optional:
    /// - `CHAIN_ID`: default 11155111 (Sepolia)
    /// - `CHAIN_NAME`: default `sepolia`
    /// - `WRITE_MODE`: `simulate` (default) or `submit`
    /// - `RPC_TIMEOUT_SECS`: default 30
    /// - `PORT`: default 3000
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a missing required value or any value
    /// that fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let upstream_rpc_url = get("RPC_URL").ok_or(ConfigError::Missing("RPC_URL"))?;
        let contract_address = parse_address(&get("CONTRACT_ADDRESS").ok_or(ConfigError::Missing("CONTRACT_ADDRESS"))?)?;
        let chain_id = get("CHAIN_ID").as_deref().map(parse_chain_id).transpose()?.unwrap_or(SEPOLIA_CHAIN_ID);
        let chain_name = get("CHAIN_NAME").unwrap_or_else(|| DEFAULT_CHAIN_NAME.to_owned());
        let write_mode = get("WRITE_MODE").as_deref().map(str::parse::<WriteMode>).transpose()?.unwrap_or_default();
        let rpc_timeout_secs = parse_number("RPC_TIMEOUT_SECS", get("RPC_TIMEOUT_SECS"), DEFAULT_RPC_TIMEOUT_SECS)?;
        let port = parse_number("PORT", get("PORT"), DEFAULT_PORT)?;

        let rpc_timeout = Duration::from_secs(rpc_timeout_secs);
        let chain = ChainConfig {
            chain_id,
            chain_name,
            rpc_url: RPC_PROXY_PATH.to_owned(),
            contract_address,
            write_mode,
            rpc_timeout_ms: rpc_timeout_secs.saturating_mul(1000),
        };
        Ok(Self { port, upstream_rpc_url, rpc_timeout, chain })
    }
}

/// Parse a positive integer setting, falling back to `default` when unset.
fn parse_number<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(ConfigError::InvalidNumber { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

//! Public chain configuration shared between server and browser.
//!
//! DESIGN
//! ======
//! The server builds a `ChainConfig` from its environment and serves it at
//! `/api/chain/config`. Only values safe to expose live here; the upstream
//! RPC URL stays on the server and the browser talks to the proxy path.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Sepolia testnet chain id.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;
pub const DEFAULT_CHAIN_NAME: &str = "sepolia";
/// Path of the server-side JSON-RPC proxy, relative to the site origin.
pub const RPC_PROXY_PATH: &str = "/api/rpc";
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

/// Errors produced while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("missing required config value: {0}")]
    Missing(&'static str),

    /// The contract address is not 20 bytes of hex.
    #[error("invalid contract address '{0}'")]
    InvalidAddress(String),

    /// The chain id is not a positive integer.
    #[error("invalid chain id '{0}'")]
    InvalidChainId(String),

    /// The write mode is neither `simulate` nor `submit`.
    #[error("unsupported write mode '{0}' (expected 'simulate' or 'submit')")]
    InvalidWriteMode(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value for {key}: '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

/// What the update action does with a successfully simulated write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Prepare the transaction and stop; nothing is broadcast.
    #[default]
    Simulate,
    /// Hand the prepared transaction to the wallet for signing and broadcast.
    Submit,
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "simulate" => Ok(Self::Simulate),
            "submit" => Ok(Self::Submit),
            _ => Err(ConfigError::InvalidWriteMode(raw.to_owned())),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulate => f.write_str("simulate"),
            Self::Submit => f.write_str("submit"),
        }
    }
}

/// Chain and contract settings the browser needs to reach the network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EIP-155 chain id the contract is deployed on.
    pub chain_id: u64,
    /// Human-readable network name.
    pub chain_name: String,
    /// JSON-RPC endpoint as seen from the browser.
    pub rpc_url: String,
    /// Deployed `StringStore` address.
    pub contract_address: Address,
    #[serde(default)]
    pub write_mode: WriteMode,
    /// Upper bound for a single RPC round trip.
    #[serde(default = "default_rpc_timeout_ms")]
    pub rpc_timeout_ms: u64,
}

fn default_rpc_timeout_ms() -> u64 {
    DEFAULT_RPC_TIMEOUT_MS
}

/// Parse a contract or account address. Accepts any hex casing.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidAddress`] when the value is not a
/// `0x`-prefixed 20-byte hex string.
pub fn parse_address(raw: &str) -> Result<Address, ConfigError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(ConfigError::InvalidAddress(raw.to_owned()));
    }
    trimmed
        .parse::<Address>()
        .map_err(|_| ConfigError::InvalidAddress(raw.to_owned()))
}

/// Parse a decimal (`11155111`) or hex quantity (`0xaa36a7`) chain id.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidChainId`] for zero, negative or malformed input.
pub fn parse_chain_id(raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim();
    let parsed = match trimmed.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => trimmed.parse::<u64>().ok(),
    };
    match parsed {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ConfigError::InvalidChainId(raw.to_owned())),
    }
}

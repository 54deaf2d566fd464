//! Chain configuration as fetched from the host server.
//!
//! The page cannot read or write the contract until this is loaded; the
//! accessors below report [`ContractError::NotConfigured`] until then.

#[cfg(test)]
#[path = "chain_test.rs"]
mod chain_test;

use chain::{ChainConfig, WriteMode};

use crate::net::contract::{ContractError, MessageContract};
use crate::net::rpc::{HttpTransport, public_client};

/// Chain configuration and its fetch status.
#[derive(Clone, Debug, Default)]
pub struct ChainState {
    pub config: Option<ChainConfig>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ChainState {
    /// Start a fetch. Returns `false` if one is running or config is loaded.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading || self.config.is_some() {
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    pub fn finish_fetch(&mut self, result: Result<ChainConfig, String>) {
        self.loading = false;
        match result {
            Ok(config) => {
                log::info!(
                    "chain config loaded: {} ({}), contract {}, write mode {}",
                    config.chain_name,
                    config.chain_id,
                    config.contract_address,
                    config.write_mode
                );
                self.config = Some(config);
            }
            Err(e) => {
                log::error!("failed to load chain config: {e}");
                self.error = Some(e);
            }
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        self.config.as_ref().map(|c| c.write_mode).unwrap_or_default()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.config.as_ref().map(|c| c.chain_id)
    }

    /// Contract accessor over HTTP for the loaded config.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NotConfigured`] before the config is loaded.
    pub fn contract(&self) -> Result<MessageContract<HttpTransport>, ContractError> {
        let config = self.config.as_ref().ok_or(ContractError::NotConfigured)?;
        Ok(MessageContract::new(public_client(config), config.contract_address))
    }
}

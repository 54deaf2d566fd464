//! `StringStore` contract accessor.
//!
//! Reads go through `eth_call`. Writes are *prepared* by simulating the call
//! with the user's account as sender; the resulting [`PreparedRequest`] is
//! only broadcast when [`submit`] hands it to the wallet.
//!
//! ERROR HANDLING
//! ==============
//! Node errors that carry revert data become [`ContractError::Reverted`] with
//! the decoded `Error(string)` reason; everything else stays a network error.
//! Callers must treat a failed read as "unknown value", never as "".

#[cfg(test)]
#[path = "contract_test.rs"]
mod contract_test;

use chain::abi::{self, AbiError};
use chain::{Address, B256, Bytes, CallRequest, TransactionRequest};
use serde::{Deserialize, Serialize};

use super::provider::{ProviderError, WalletProvider};
use super::rpc::{PublicClient, RpcError, RpcTransport, WalletClient, read_call};

/// Errors produced by contract reads and writes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractError {
    /// The chain configuration has not been loaded.
    #[error("chain configuration is not available")]
    NotConfigured,

    /// The RPC request failed before the contract ran.
    #[error("network request failed: {0}")]
    Network(RpcError),

    /// The simulated call reverted.
    #[error("execution reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted { reason: Option<String> },

    /// The return data could not be decoded.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Write mode needs a wallet but none is injected.
    #[error("no wallet available to sign the transaction")]
    NoWallet,

    /// The wallet is on a different chain than the one the request was
    /// prepared for.
    #[error("wallet is on chain {actual}, expected chain {expected}")]
    WrongChain { expected: u64, actual: u64 },

    /// The wallet refused or failed to send the transaction.
    #[error("wallet request failed: {0}")]
    Wallet(#[from] ProviderError),
}

impl ContractError {
    /// Revert reason, when the node supplied one.
    #[must_use]
    pub fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Reverted { reason } => reason.as_deref(),
            _ => None,
        }
    }
}

impl From<RpcError> for ContractError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Rpc { code, message, data } if is_revert(code, &message, data.as_deref()) => {
                let reason = data
                    .as_deref()
                    .and_then(|hex| abi::decode_hex(hex).ok())
                    .and_then(|bytes| abi::revert_reason(&bytes))
                    .or_else(|| {
                        message
                            .strip_prefix("execution reverted: ")
                            .map(str::to_owned)
                    });
                Self::Reverted { reason }
            }
            other => Self::Network(other),
        }
    }
}

fn is_revert(code: i64, message: &str, data: Option<&str>) -> bool {
    code == chain::rpc::CODE_EXECUTION_REVERTED
        || message.contains("revert")
        || data.is_some_and(|d| d.len() > 2)
}

/// A simulated, unsigned `setMessage` transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedRequest {
    pub chain_id: u64,
    pub from: Address,
    pub to: Address,
    pub function: String,
    pub args: Vec<String>,
    pub data: Bytes,
}

impl PreparedRequest {
    /// Transaction object for `eth_sendTransaction`, pinned to `chain_id`.
    #[must_use]
    pub fn to_transaction(&self) -> TransactionRequest {
        TransactionRequest { from: self.from, to: self.to, data: self.data.clone(), chain_id: self.chain_id }
    }
}

/// Accessor bound to one deployed contract.
pub struct MessageContract<T> {
    client: PublicClient<T>,
    address: Address,
}

impl<T: RpcTransport> MessageContract<T> {
    #[must_use]
    pub fn new(client: PublicClient<T>, address: Address) -> Self {
        Self { client, address }
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &PublicClient<T> {
        &self.client
    }

    /// Read the stored string.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Network`] or [`ContractError::Abi`].
    pub async fn get_message(&self) -> Result<String, ContractError> {
        let result = self.read_message().await;
        if let Err(e) = &result {
            log::error!("error reading message: {e}");
        }
        result
    }

    async fn read_message(&self) -> Result<String, ContractError> {
        let data = self.client.call(&read_call(self.address, abi::encode_get_message())).await?;
        Ok(abi::decode_get_message(&data)?)
    }

    /// Simulate `setMessage(new_message)` from `account`.
    ///
    /// Nothing is signed or broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Reverted`] when the simulation reverts, or
    /// [`ContractError::Network`].
    pub async fn set_message(&self, new_message: &str, account: Address) -> Result<PreparedRequest, ContractError> {
        let result = self.simulate_set_message(new_message, account).await;
        if let Err(e) = &result {
            log::error!("error setting message: {e}");
        }
        result
    }

    async fn simulate_set_message(&self, new_message: &str, account: Address) -> Result<PreparedRequest, ContractError> {
        let data = abi::encode_set_message(new_message);
        let call = CallRequest { from: Some(account), to: self.address, data: data.clone() };
        self.client.call(&call).await?;
        Ok(PreparedRequest {
            chain_id: self.client.chain_id(),
            from: account,
            to: self.address,
            function: abi::SET_MESSAGE.to_owned(),
            args: vec![new_message.to_owned()],
            data,
        })
    }
}

/// Send a prepared request through the wallet for signing and broadcast.
///
/// The wallet's current chain is checked first; nothing is sent when it
/// differs from the chain the request was prepared for.
///
/// # Errors
///
/// Returns [`ContractError::WrongChain`] on a network mismatch and
/// [`ContractError::Wallet`] when the wallet rejects or fails.
pub async fn submit<P: WalletProvider>(wallet: &WalletClient<P>, prepared: &PreparedRequest) -> Result<B256, ContractError> {
    let actual = wallet.wallet_chain_id().await?;
    if actual != prepared.chain_id {
        log::warn!("refusing to send setMessage: wallet on chain {actual}, prepared for {}", prepared.chain_id);
        return Err(ContractError::WrongChain { expected: prepared.chain_id, actual });
    }
    let tx_hash = wallet.send_transaction(&prepared.to_transaction()).await?;
    log::info!("setMessage transaction sent: {tx_hash}");
    Ok(tx_hash)
}

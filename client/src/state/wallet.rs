//! Wallet connection manager.
//!
//! SYSTEM CONTEXT
//! ==============
//! Tracks whether a browser wallet is connected and which account is active.
//! The async halves (`request_connection`, `restore_session`) talk to the
//! injected provider; the synchronous transitions on `WalletState` apply
//! their results. The page glues the two around each await point, so the
//! signal is never borrowed across a suspension.
//!
//! Disconnecting is local bookkeeping only: wallets expose no revoke call, so
//! the site stays authorized wallet-side and a reload silently reconnects.

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

use chain::Address;

use crate::net::provider::{self, ProviderError, WalletProvider};
use crate::state::ui::Notice;
use crate::util::address::short_address;

pub const INSTALL_WALLET_NOTICE: &str = "Please install MetaMask!";
pub const CONNECT_FAILED_NOTICE: &str = "Failed to connect wallet";

/// Wallet connection lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    /// Waiting on the wallet's authorization prompt.
    Connecting,
    Connected,
}

/// Errors from the connect flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("no injected wallet provider")]
    NoProvider,

    #[error("wallet authorization rejected")]
    UserRejected,

    /// The wallet authorized the site but returned no accounts.
    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error(transparent)]
    Provider(ProviderError),
}

impl From<ProviderError> for WalletError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UserRejected => Self::UserRejected,
            other => Self::Provider(other),
        }
    }
}

/// An authorized account and the chain the wallet is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalletSession {
    pub account: Address,
    pub chain_id: Option<u64>,
}

/// Connection state for the current page. `account` is `Some` iff
/// `status == Connected`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletState {
    pub status: ConnectionStatus,
    pub account: Option<Address>,
    /// Chain the wallet reported when it connected, if it answered.
    pub chain_id: Option<u64>,
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected && self.account.is_some()
    }

    pub fn is_connecting(&self) -> bool {
        self.status == ConnectionStatus::Connecting
    }

    /// The active account, only while connected.
    pub fn connected_account(&self) -> Option<Address> {
        if self.is_connected() { self.account } else { None }
    }

    /// `0x1234...abcd` for the connected account.
    pub fn display_account(&self) -> Option<String> {
        self.connected_account().map(|a| short_address(&a))
    }

    /// True when the wallet is known to be on a chain other than `expected`.
    pub fn is_wrong_chain(&self, expected: u64) -> bool {
        self.is_connected() && matches!(self.chain_id, Some(id) if id != expected)
    }

    /// Enter `Connecting`. Returns `false` (and changes nothing) unless
    /// currently disconnected.
    pub fn begin_connect(&mut self) -> bool {
        if self.status != ConnectionStatus::Disconnected {
            return false;
        }
        self.status = ConnectionStatus::Connecting;
        true
    }

    /// Apply the outcome of [`request_connection`]. Failures restore the
    /// disconnected state and may yield a notice for the user.
    pub fn finish_connect(&mut self, result: Result<WalletSession, WalletError>) -> Option<Notice> {
        match result {
            Ok(session) => {
                self.adopt(session);
                None
            }
            Err(WalletError::NoAccounts) => {
                self.reset_if_connecting();
                None
            }
            Err(WalletError::NoProvider) => {
                self.reset_if_connecting();
                Some(Notice::warning(INSTALL_WALLET_NOTICE))
            }
            Err(err) => {
                log::error!("error connecting wallet: {err}");
                self.reset_if_connecting();
                Some(Notice::error(CONNECT_FAILED_NOTICE))
            }
        }
    }

    /// Adopt a previously authorized session found at startup. Ignored once
    /// the user has started connecting or is already connected.
    pub fn restore(&mut self, session: Option<WalletSession>) {
        if self.status != ConnectionStatus::Disconnected {
            return;
        }
        if let Some(session) = session {
            self.adopt(session);
        }
    }

    /// Forget the account locally.
    pub fn disconnect(&mut self) {
        *self = Self::default();
    }

    fn adopt(&mut self, session: WalletSession) {
        self.status = ConnectionStatus::Connected;
        self.account = Some(session.account);
        self.chain_id = session.chain_id;
    }

    fn reset_if_connecting(&mut self) {
        if self.status == ConnectionStatus::Connecting {
            self.status = ConnectionStatus::Disconnected;
        }
    }
}

/// Ask the wallet for account access and return the first account.
///
/// # Errors
///
/// Returns [`WalletError::NoProvider`] without a wallet,
/// [`WalletError::UserRejected`] when the prompt is declined, and
/// [`WalletError::NoAccounts`] for an empty authorization.
pub async fn request_connection(wallet: Option<&dyn WalletProvider>) -> Result<WalletSession, WalletError> {
    let wallet = wallet.ok_or(WalletError::NoProvider)?;
    let accounts = provider::request_accounts(wallet).await?;
    let account = accounts.first().copied().ok_or(WalletError::NoAccounts)?;
    let chain_id = match provider::chain_id(wallet).await {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("wallet chain id unavailable: {e}");
            None
        }
    };
    Ok(WalletSession { account, chain_id })
}

/// Non-interactive lookup of an already-authorized account.
pub async fn restore_session(wallet: Option<&dyn WalletProvider>) -> Option<WalletSession> {
    let wallet = wallet?;
    let accounts = match provider::accounts(wallet).await {
        Ok(accounts) => accounts,
        Err(e) => {
            log::error!("error checking wallet accounts: {e}");
            return None;
        }
    };
    let account = accounts.first().copied()?;
    let chain_id = provider::chain_id(wallet).await.ok();
    Some(WalletSession { account, chain_id })
}

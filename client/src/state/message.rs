//! Page state for the stored message: cached value, draft, and busy flags.
//!
//! DESIGN
//! ======
//! Results land in completion order. Each load takes a ticket from `seq` when
//! it starts; a successful update always installs its text and marks every
//! ticket issued so far as applied. A read that was already in flight when
//! the write finished is therefore dropped and cannot clobber the optimistic
//! value, while a read started afterwards still lands.
//!
//! ERROR HANDLING
//! ==============
//! One error string is shown at a time. It is cleared when the next load or
//! update starts and replaced by that operation's failure text, if any. A
//! failed read leaves the cached message untouched.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use chain::{Address, B256, WriteMode};

use crate::net::contract::{self, ContractError, MessageContract, PreparedRequest};
use crate::net::provider::WalletProvider;
use crate::net::rpc::{RpcTransport, WalletClient};
use crate::state::ui::Notice;
use crate::state::wallet::WalletState;

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load message from contract. Make sure you have the correct contract address and RPC URL.";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update message";
pub const CONNECT_FIRST_NOTICE: &str = "Please connect your wallet first";
pub const PREPARED_NOTICE: &str =
    "Transaction prepared! In a real implementation, this would be sent to your wallet for signing.";
pub const EMPTY_MESSAGE_LABEL: &str = "No message loaded";

/// Why an update was not started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateBlocked {
    /// An update is already in flight.
    Busy,
    NotConnected,
    /// Draft is empty or whitespace.
    EmptyDraft,
}

impl UpdateBlocked {
    /// Notice to show the user, if the refusal warrants one.
    pub fn notice(self) -> Option<Notice> {
        match self {
            Self::NotConnected => Some(Notice::warning(CONNECT_FIRST_NOTICE)),
            Self::Busy | Self::EmptyDraft => None,
        }
    }
}

/// A validated update, captured before any await.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateIntent {
    pub message: String,
    pub account: Address,
}

/// Result of a successful update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Simulated only; nothing was broadcast.
    Prepared(PreparedRequest),
    /// Signed and broadcast by the wallet.
    Submitted { prepared: PreparedRequest, tx_hash: B256 },
}

impl UpdateOutcome {
    pub fn prepared(&self) -> &PreparedRequest {
        match self {
            Self::Prepared(prepared) | Self::Submitted { prepared, .. } => prepared,
        }
    }

    pub fn tx_hash(&self) -> Option<B256> {
        match self {
            Self::Prepared(_) => None,
            Self::Submitted { tx_hash, .. } => Some(*tx_hash),
        }
    }

    fn notice(&self) -> Notice {
        match self {
            Self::Prepared(_) => Notice::info(PREPARED_NOTICE),
            Self::Submitted { tx_hash, .. } => Notice::info(format!("Transaction sent: {tx_hash}")),
        }
    }
}

/// Message card and update form state.
#[derive(Clone, Debug, Default)]
pub struct MessageState {
    /// Last value read from or written to the contract.
    pub message: String,
    /// Input box text.
    pub draft: String,
    pub loading: bool,
    pub updating: bool,
    pub error: Option<String>,
    pub last_prepared: Option<PreparedRequest>,
    pub last_tx_hash: Option<B256>,
    seq: u64,
    applied_seq: u64,
}

impl MessageState {
    /// Text for the message card.
    pub fn display_message(&self) -> &str {
        if self.message.is_empty() { EMPTY_MESSAGE_LABEL } else { &self.message }
    }

    pub fn draft_is_blank(&self) -> bool {
        self.draft.trim().is_empty()
    }

    fn next_ticket(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn apply_read(&mut self, ticket: u64, message: String) {
        if ticket <= self.applied_seq {
            log::debug!("dropping stale read (ticket {ticket}, applied {})", self.applied_seq);
            return;
        }
        self.applied_seq = ticket;
        self.message = message;
    }

    fn apply_write(&mut self, message: String) {
        self.applied_seq = self.seq;
        self.message = message;
    }

    // =========================================================================
    // LOAD
    // =========================================================================

    /// Start a read. Returns `None` while one is already running.
    pub fn begin_load(&mut self) -> Option<u64> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.next_ticket())
    }

    pub fn finish_load(&mut self, ticket: u64, result: Result<String, ContractError>) {
        self.loading = false;
        match result {
            Ok(message) => self.apply_read(ticket, message),
            Err(_) => self.error = Some(LOAD_FAILED_MESSAGE.to_owned()),
        }
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Validate the draft against the wallet. Changes nothing.
    ///
    /// # Errors
    ///
    /// Returns the reason the update cannot start.
    pub fn prepare_update(&self, wallet: &WalletState) -> Result<UpdateIntent, UpdateBlocked> {
        if self.updating {
            return Err(UpdateBlocked::Busy);
        }
        let account = wallet.connected_account().ok_or(UpdateBlocked::NotConnected)?;
        if self.draft_is_blank() {
            return Err(UpdateBlocked::EmptyDraft);
        }
        Ok(UpdateIntent { message: self.draft.clone(), account })
    }

    /// Start an update. Returns `false` while one is already running.
    pub fn begin_update(&mut self) -> bool {
        if self.updating {
            return false;
        }
        self.updating = true;
        self.error = None;
        true
    }

    /// Apply an update result and return the notice to show.
    ///
    /// On success the displayed message becomes `submitted` and reads still
    /// in flight are discarded. The draft is cleared only if the user has not
    /// typed something else in the meantime.
    pub fn finish_update(
        &mut self,
        submitted: &str,
        result: Result<UpdateOutcome, ContractError>,
    ) -> Option<Notice> {
        self.updating = false;
        match result {
            Ok(outcome) => {
                let notice = outcome.notice();
                self.last_tx_hash = outcome.tx_hash();
                self.last_prepared = Some(outcome.prepared().clone());
                self.apply_write(submitted.to_owned());
                if self.draft == submitted {
                    self.draft.clear();
                }
                Some(notice)
            }
            Err(e) => {
                self.error = Some(update_failure_text(&e));
                None
            }
        }
    }
}

/// Banner text for a failed update.
pub fn update_failure_text(err: &ContractError) -> String {
    if let ContractError::WrongChain { expected, actual } = err {
        return format!("{UPDATE_FAILED_MESSAGE}: switch your wallet from chain {actual} to chain {expected}");
    }
    match err.revert_reason() {
        Some(reason) => format!("{UPDATE_FAILED_MESSAGE}: {reason}"),
        None => UPDATE_FAILED_MESSAGE.to_owned(),
    }
}

/// Prepare the write and, in submit mode, hand it to the wallet.
///
/// # Errors
///
/// Propagates simulation failures; returns [`ContractError::NoWallet`] in
/// submit mode without a wallet.
pub async fn perform_update<T: RpcTransport, P: WalletProvider>(
    contract: &MessageContract<T>,
    wallet: Option<&WalletClient<P>>,
    mode: WriteMode,
    intent: &UpdateIntent,
) -> Result<UpdateOutcome, ContractError> {
    let prepared = contract.set_message(&intent.message, intent.account).await?;
    match mode {
        WriteMode::Simulate => Ok(UpdateOutcome::Prepared(prepared)),
        WriteMode::Submit => {
            let wallet = wallet.ok_or(ContractError::NoWallet)?;
            let tx_hash = contract::submit(wallet, &prepared).await?;
            Ok(UpdateOutcome::Submitted { prepared, tx_hash })
        }
    }
}

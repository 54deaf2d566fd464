//! Async flows behind the home page's buttons.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each action reads the signals it needs, applies the synchronous `begin_*`
//! transition, then spawns the network half on the local executor and applies
//! `finish_*` when it resolves. Signals are only touched between awaits.
//!
//! Server-side (SSR) the actions are inert: nothing is spawned because there
//! is no wallet or browser fetch to drive.

#![cfg_attr(not(feature = "hydrate"), allow(unused_variables))]

use leptos::prelude::*;

use crate::state::chain::ChainState;
use crate::state::message::MessageState;
use crate::state::ui::{Notice, UiState};
use crate::state::wallet::WalletState;

/// The page's shared state signals, taken from context once.
#[derive(Clone, Copy)]
pub(crate) struct HomeSignals {
    pub wallet: RwSignal<WalletState>,
    pub message: RwSignal<MessageState>,
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    pub chain: RwSignal<ChainState>,
    pub ui: RwSignal<UiState>,
}

impl HomeSignals {
    pub(crate) fn from_context() -> Self {
        Self {
            wallet: expect_context::<RwSignal<WalletState>>(),
            message: expect_context::<RwSignal<MessageState>>(),
            chain: expect_context::<RwSignal<ChainState>>(),
            ui: expect_context::<RwSignal<UiState>>(),
        }
    }
}

/// Show `notice` and schedule its auto-dismiss.
pub(crate) fn show_notice(ui: RwSignal<UiState>, notice: Notice) {
    let Some(seq) = ui.try_update(|u| u.show(notice)) else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(crate::state::ui::NOTICE_TTL_MS)).await;
        let _ = ui.try_update(|u| u.dismiss_if_current(seq));
    });
}

/// Mount-time work: fetch the chain config and read the message, and
/// separately restore an already-authorized wallet. A slow wallet extension
/// does not hold up the first read.
pub(crate) fn bootstrap(signals: HomeSignals) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(load_message(signals));

        leptos::task::spawn_local(async move {
            use crate::net::provider::{InjectedProvider, WalletProvider};

            let provider = InjectedProvider::detect();
            let session =
                crate::state::wallet::restore_session(provider.as_ref().map(|p| p as &dyn WalletProvider)).await;
            let _ = signals.wallet.try_update(|w| w.restore(session));
        });
    }
}

/// Re-read the message.
pub(crate) fn refresh(signals: HomeSignals) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(load_message(signals));
}

/// Ask the wallet for account access.
pub(crate) fn connect(signals: HomeSignals) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::provider::{InjectedProvider, WalletProvider};
        use crate::state::wallet::request_connection;

        let provider = InjectedProvider::detect();
        if provider.is_some() && !signals.wallet.try_update(WalletState::begin_connect).unwrap_or(false) {
            return;
        }
        leptos::task::spawn_local(async move {
            let result = request_connection(provider.as_ref().map(|p| p as &dyn WalletProvider)).await;
            if let Some(notice) = signals.wallet.try_update(|w| w.finish_connect(result)).flatten() {
                show_notice(signals.ui, notice);
            }
        });
    }
}

pub(crate) fn disconnect(signals: HomeSignals) {
    signals.wallet.update(WalletState::disconnect);
    log::info!("wallet disconnected locally");
}

/// Validate the draft, then prepare (and in submit mode send) the write.
pub(crate) fn update(signals: HomeSignals) {
    let checked = signals
        .wallet
        .with_untracked(|wallet| signals.message.with_untracked(|m| m.prepare_update(wallet)));
    let intent = match checked {
        Ok(intent) => intent,
        Err(blocked) => {
            if let Some(notice) = blocked.notice() {
                show_notice(signals.ui, notice);
            }
            return;
        }
    };
    if !signals.message.try_update(MessageState::begin_update).unwrap_or(false) {
        return;
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::net::rpc::wallet_client;
        use crate::state::message::perform_update;

        let result = match ensure_config(signals).await {
            Ok(contract) => {
                let mode = signals.chain.with_untracked(ChainState::write_mode);
                let wallet = signals.chain.with_untracked(|c| c.config.as_ref().and_then(wallet_client));
                perform_update(&contract, wallet.as_ref(), mode, &intent).await
            }
            Err(e) => Err(e),
        };
        if let Some(notice) = signals.message.try_update(|m| m.finish_update(&intent.message, result)).flatten() {
            show_notice(signals.ui, notice);
        }
    });
}

/// Fetch the chain config if it is not loaded yet and build the contract
/// accessor from it.
#[cfg(feature = "hydrate")]
async fn ensure_config(
    signals: HomeSignals,
) -> Result<crate::net::contract::MessageContract<crate::net::rpc::HttpTransport>, crate::net::contract::ContractError> {
    if signals.chain.try_update(ChainState::begin_fetch).unwrap_or(false) {
        let result = crate::net::api::fetch_chain_config().await;
        let _ = signals.chain.try_update(|c| c.finish_fetch(result));
    }
    signals.chain.with_untracked(ChainState::contract)
}

#[cfg(feature = "hydrate")]
async fn load_message(signals: HomeSignals) {
    let Some(ticket) = signals.message.try_update(MessageState::begin_load).flatten() else {
        return;
    };
    let result = match ensure_config(signals).await {
        Ok(contract) => contract.get_message().await,
        Err(e) => Err(e),
    };
    let _ = signals.message.try_update(|m| m.finish_load(ticket, result));
}

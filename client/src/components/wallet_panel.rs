//! Wallet connection card: connect/disconnect and the active account.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads `WalletState` and `ChainState` from context. The connect and
//! disconnect flows live in the page; this component only fires callbacks.

#[cfg(test)]
#[path = "wallet_panel_test.rs"]
mod wallet_panel_test;

use leptos::prelude::*;

use crate::state::chain::ChainState;
use crate::state::wallet::{ConnectionStatus, WalletState};

/// Wallet connection card.
#[component]
pub fn WalletPanel(on_connect: Callback<()>, on_disconnect: Callback<()>) -> impl IntoView {
    let wallet = expect_context::<RwSignal<WalletState>>();
    let chain = expect_context::<RwSignal<ChainState>>();

    let connected = move || wallet.get().is_connected();
    let connecting = move || wallet.get().is_connecting();
    let account_label = move || wallet.get().display_account().map(|a| format!("Connected: {a}")).unwrap_or_default();
    let network_warning = move || {
        let chain_state = chain.get();
        let config = chain_state.config.as_ref()?;
        wrong_network_text(&wallet.get(), config.chain_id, &config.chain_name)
    };

    view! {
        <section class="card wallet-panel">
            <div class="wallet-panel__row">
                <h2 class="card__title">"Wallet Connection"</h2>
                <Show
                    when=connected
                    fallback=move || view! {
                        <button
                            class="button button--primary"
                            on:click=move |_| on_connect.run(())
                            disabled=connecting
                        >
                            {move || connect_button_label(wallet.get().status)}
                        </button>
                    }
                >
                    <div class="wallet-panel__account">
                        <span class="wallet-panel__address">{account_label}</span>
                        <button class="button button--danger" on:click=move |_| on_disconnect.run(())>
                            "Disconnect"
                        </button>
                    </div>
                </Show>
            </div>
            <Show when=move || network_warning().is_some()>
                <p class="wallet-panel__warning">{move || network_warning().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}

/// Label for the connect button.
pub fn connect_button_label(status: ConnectionStatus) -> &'static str {
    if status == ConnectionStatus::Connecting { "Connecting..." } else { "Connect Wallet" }
}

/// Warning shown when the wallet is on a different chain than configured.
pub fn wrong_network_text(wallet: &WalletState, expected_id: u64, expected_name: &str) -> Option<String> {
    if !wallet.is_wrong_chain(expected_id) {
        return None;
    }
    let actual = wallet.chain_id.map_or_else(|| "unknown".to_owned(), |id| id.to_string());
    Some(format!("Wallet is on chain {actual}; switch to {expected_name} ({expected_id}) to update the message."))
}

//! "Update Message" card: draft input and the update action.
//!
//! The button stays disabled while disconnected, while an update runs, and
//! while the draft is blank. The page re-checks the same conditions when the
//! callback fires.

#[cfg(test)]
#[path = "update_form_test.rs"]
mod update_form_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::state::chain::ChainState;
use crate::state::message::MessageState;
use crate::state::wallet::WalletState;
use crate::util::address::explorer_tx_url;

pub const DRAFT_PLACEHOLDER: &str = "Enter your message about merch (Quarterzip, Hoodie, Polo)";

/// Draft input and update button.
#[component]
pub fn UpdateForm(on_update: Callback<()>) -> impl IntoView {
    let message = expect_context::<RwSignal<MessageState>>();
    let wallet = expect_context::<RwSignal<WalletState>>();
    let chain = expect_context::<RwSignal<ChainState>>();

    let disabled = move || update_button_disabled(&wallet.get(), &message.get());
    let updating = move || message.get().updating;
    let tx_link = move || {
        let hash = message.get().last_tx_hash?;
        let chain_id = chain.get().chain_id()?;
        let hash = hash.to_string();
        Some((explorer_tx_url(chain_id, &hash), hash))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        on_update.run(());
    };

    view! {
        <section class="card update-form">
            <h2 class="card__title">"Update Message"</h2>
            <form class="update-form__body" on:submit=on_submit>
                <label class="update-form__label" for="new-message">"New Message"</label>
                <input
                    id="new-message"
                    class="update-form__input"
                    type="text"
                    placeholder=DRAFT_PLACEHOLDER
                    prop:value=move || message.get().draft
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        message.update(|m| m.draft = value);
                    }
                />
                <button class="button button--primary" type="submit" disabled=disabled>
                    {move || update_button_label(updating())}
                </button>
            </form>
            {move || {
                tx_link().map(|(url, hash)| match url {
                    Some(url) => view! {
                        <p class="update-form__tx">"Last transaction: " <a href=url target="_blank" rel="noreferrer">{hash}</a></p>
                    }
                    .into_any(),
                    None => view! { <p class="update-form__tx">"Last transaction: " {hash}</p> }.into_any(),
                })
            }}
        </section>
    }
}

/// Whether the update button is disabled.
pub fn update_button_disabled(wallet: &WalletState, message: &MessageState) -> bool {
    !wallet.is_connected() || message.updating || message.draft_is_blank()
}

/// Label for the update button.
pub fn update_button_label(updating: bool) -> &'static str {
    if updating { "Updating..." } else { "Update Message" }
}

//! "Current Message" card with the refresh action.

#[cfg(test)]
#[path = "message_card_test.rs"]
mod message_card_test;

use leptos::prelude::*;

use crate::state::message::MessageState;

/// Shows the cached contract message.
#[component]
pub fn MessageCard(on_refresh: Callback<()>) -> impl IntoView {
    let message = expect_context::<RwSignal<MessageState>>();

    let loading = move || message.get().loading;
    let text = move || message.get().display_message().to_owned();

    view! {
        <section class="card message-card">
            <h2 class="card__title">"Current Message"</h2>
            <Show
                when=loading
                fallback=move || view! {
                    <div class="message-card__value">
                        <p>{text}</p>
                    </div>
                }
            >
                <div class="message-card__loading">
                    <span class="spinner"></span>
                    <span>"Loading..."</span>
                </div>
            </Show>
            <button class="button button--success" on:click=move |_| on_refresh.run(()) disabled=loading>
                {move || refresh_button_label(loading())}
            </button>
        </section>
    }
}

/// Label for the refresh button.
pub fn refresh_button_label(loading: bool) -> &'static str {
    if loading { "Loading..." } else { "Refresh Message" }
}

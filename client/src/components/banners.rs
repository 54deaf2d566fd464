//! Error and notice banners.
//!
//! The error banner mirrors whichever operation failed last (chain config,
//! read, or write). The notice banner shows one `Notice` at a time and can be
//! dismissed by hand; the page also schedules an auto-dismiss.

#[cfg(test)]
#[path = "banners_test.rs"]
mod banners_test;

use leptos::prelude::*;

use crate::state::chain::ChainState;
use crate::state::message::MessageState;
use crate::state::ui::{NoticeKind, UiState};

/// Red banner for the current operation error.
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let message = expect_context::<RwSignal<MessageState>>();
    let chain = expect_context::<RwSignal<ChainState>>();

    let text = move || current_error(&chain.get(), &message.get());

    view! {
        <Show when=move || text().is_some()>
            <div class="banner banner--error" role="alert">
                <p>{move || text().unwrap_or_default()}</p>
            </div>
        </Show>
    }
}

/// Dismissable notice banner.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let notice = move || ui.get().notice;

    view! {
        {move || {
            notice().map(|n| {
                let class = notice_class(n.kind);
                view! {
                    <div class=class role="status">
                        <p>{n.text}</p>
                        <button class="banner__close" on:click=move |_| ui.update(UiState::dismiss) title="Dismiss">
                            "x"
                        </button>
                    </div>
                }
            })
        }}
    }
}

/// Error to show: a message-level error wins over a config error.
pub fn current_error(chain: &ChainState, message: &MessageState) -> Option<String> {
    message.error.clone().or_else(|| chain.error.as_ref().map(|e| format!("Chain configuration unavailable: {e}")))
}

pub fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "banner banner--info",
        NoticeKind::Warning => "banner banner--warning",
        NoticeKind::Error => "banner banner--error",
    }
}

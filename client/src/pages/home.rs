//! Single-screen home page: wallet card, message cards, banners, setup notes.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page restores any already-authorized wallet, fetches the
//! chain config from the host, and loads the message. Buttons route to the
//! flows in `home_actions`.

use leptos::prelude::*;

use crate::components::banners::{ErrorBanner, NoticeBanner};
use crate::components::message_card::MessageCard;
use crate::components::setup_panel::SetupPanel;
use crate::components::update_form::UpdateForm;
use crate::components::wallet_panel::WalletPanel;
use crate::pages::home_actions::{self, HomeSignals};

/// Home page.
#[component]
pub fn HomePage() -> impl IntoView {
    let signals = HomeSignals::from_context();

    let booted = RwSignal::new(false);
    Effect::new(move || {
        if booted.get_untracked() {
            return;
        }
        booted.set(true);
        home_actions::bootstrap(signals);
    });

    let on_connect = Callback::new(move |()| home_actions::connect(signals));
    let on_disconnect = Callback::new(move |()| home_actions::disconnect(signals));
    let on_refresh = Callback::new(move |()| home_actions::refresh(signals));
    let on_update = Callback::new(move |()| home_actions::update(signals));

    view! {
        <main class="home-page">
            <header class="home-page__header">
                <h1>"Smart Contract Message App"</h1>
                <p class="home-page__subtitle">"Interact with your deployed StringStore contract"</p>
            </header>

            <NoticeBanner/>
            <WalletPanel on_connect=on_connect on_disconnect=on_disconnect/>

            <div class="home-page__grid">
                <MessageCard on_refresh=on_refresh/>
                <UpdateForm on_update=on_update/>
            </div>

            <ErrorBanner/>
            <SetupPanel/>
        </main>
    }
}

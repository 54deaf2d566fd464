//! Static setup instructions for running against a fresh deployment.

use leptos::prelude::*;

/// Deployment checklist shown at the bottom of the page.
#[component]
pub fn SetupPanel() -> impl IntoView {
    view! {
        <section class="setup-panel">
            <h3 class="setup-panel__title">"Setup Instructions"</h3>
            <ol class="setup-panel__steps">
                <li>"Deploy the StringStore contract to Sepolia testnet using Remix IDE"</li>
                <li>"Get an Alchemy RPC URL for Sepolia"</li>
                <li>"Set " <code>"RPC_URL"</code> " and " <code>"CONTRACT_ADDRESS"</code> " in the server's " <code>".env"</code></li>
                <li>"Make sure you have Sepolia ETH in your MetaMask wallet"</li>
            </ol>
        </section>
    }
}

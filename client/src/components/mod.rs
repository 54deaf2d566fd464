//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the page's cards and banners from shared state provided
//! through Leptos context. Actions are passed in as callbacks so the network
//! flows stay in `pages`.

pub mod banners;
pub mod message_card;
pub mod setup_panel;
pub mod update_form;
pub mod wallet_panel;

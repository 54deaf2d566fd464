//! # client
//!
//! Leptos + WASM frontend for the StringStore message app.
//!
//! This crate contains the page, its components, client-side state, the
//! injected-wallet bridge, and the JSON-RPC client used to read and write the
//! contract. The `ssr` feature renders the page on the host server; the
//! `hydrate` feature builds the browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

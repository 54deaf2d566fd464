//! Networking modules for the chain, the wallet and the host server.
//!
//! SYSTEM CONTEXT
//! ==============
//! `rpc` builds the read-only and wallet-backed clients, `provider` bridges
//! the injected wallet, `contract` wraps the `StringStore` calls, and `api`
//! handles REST calls to the host server.

pub mod api;
pub mod contract;
pub mod provider;
pub mod rpc;

#[cfg(test)]
pub(crate) mod testing;

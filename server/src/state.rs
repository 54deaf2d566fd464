//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the public chain configuration and the upstream RPC handle; both
//! are immutable after startup.

use std::sync::Arc;

use chain::ChainConfig;

use crate::services::rpc_proxy::UpstreamRpc;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ChainConfig>,
    pub upstream: Arc<dyn UpstreamRpc>,
}

impl AppState {
    #[must_use]
    pub fn new(chain: ChainConfig, upstream: Arc<dyn UpstreamRpc>) -> Self {
        Self { chain: Arc::new(chain), upstream }
    }
}

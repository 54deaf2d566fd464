mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use config::ServerConfig;
use services::rpc_proxy::{self, HttpUpstream};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("upstream rpc: {0}")]
    Upstream(#[from] rpc_proxy::ProxyError),

    #[error("{0}")]
    Leptos(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    // `.env` is optional; real environment variables win.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(
        chain_id = config.chain.chain_id,
        chain = %config.chain.chain_name,
        contract = %config.chain.contract_address,
        write_mode = %config.chain.write_mode,
        "chain configuration loaded"
    );

    let upstream = Arc::new(HttpUpstream::new(
        config.upstream_rpc_url.clone(),
        config.rpc_timeout,
        Duration::from_secs(config::RPC_CONNECT_TIMEOUT_SECS),
    )?);

    // Non-fatal: a mismatch or unreachable node is logged, not refused.
    {
        let upstream = upstream.clone();
        let expected = config.chain.chain_id;
        tokio::spawn(async move {
            rpc_proxy::check_upstream_chain(upstream.as_ref(), expected).await;
        });
    }

    let state = state::AppState::new(config.chain, upstream);
    let app = routes::leptos_app(state).map_err(StartupError::Leptos)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "stringstore listening");
    axum::serve(listener, app).await?;
    Ok(())
}

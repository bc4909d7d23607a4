use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::build_state;
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Resolves on Ctrl+C so in-flight requests (and store writes) can finish.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app from `config.toml` (or env) and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.store.path).await?;

    // the one catalog instance for the whole process
    let state = build_state(&cfg.store).await?;

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, store = %cfg.store.path.display(), "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

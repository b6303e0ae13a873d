//! electrumx-exporter
//!
//! Serves `GET /metrics`: each request polls the ElectrumX RPC port with
//! `getinfo` (and optionally a block explorer) and answers with gauges in
//! Prometheus text format.

use tracing_subscriber::{fmt, EnvFilter};

use electrumx_exporter::{app_state, config, router};
use electrumx_exporter_core::error::{ExporterError, Result};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, kind = e.kind().as_str(), "electrumx-exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let (host, port) = cfg.listen_target();
    let host = host.to_string();

    tracing::info!(
        %host,
        port,
        rpc_host = %cfg.rpc.host,
        rpc_port = cfg.rpc.port,
        timeout_secs = cfg.rpc.timeout_secs,
        explorer = cfg.explorer.url.is_some(),
        "electrumx-exporter starting"
    );

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| ExporterError::Internal(format!("bind {host}:{port} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

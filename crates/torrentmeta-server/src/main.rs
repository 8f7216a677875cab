use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use torrentmeta_server::{ServerArgs, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    // RUST_LOG wins; otherwise info for the server and request traces.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let state = args.state()?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    tracing::info!(
        addr = %args.bind,
        auth = args.api_key.is_some(),
        max_batch = args.max_batch,
        "torrentmeta-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

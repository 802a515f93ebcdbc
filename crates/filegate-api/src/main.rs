use anyhow::Context as _;
use filegate_api::ApiContext;
use filegate_core::models::{AppConfig, LogFormat};
use filegate_core::utils::logging::init_tracing;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing(LogFormat::from_env());

    info!("Starting Filegate API v{}", filegate_core::VERSION);

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();

    let ctx = ApiContext::new(config).await?;
    let app = filegate_api::router(ctx);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

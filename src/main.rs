//! Gateway binary: loads configuration, installs logging and serves the
//! router until Ctrl-C.

use anyhow::Context;
use clap::Parser;
use drug_price_gateway::api::rest::{AppState, create_router};
use drug_price_gateway::infrastructure::config::GatewayConfig;
use drug_price_gateway::infrastructure::telemetry::{self, TelemetryConfig};
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "drug-price-gateway", version, about)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    telemetry::init(&TelemetryConfig::from_env());

    let args = Args::parse();
    let mut config =
        GatewayConfig::load(args.config.as_deref()).context("loading gateway configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    for source in &config.sources {
        tracing::info!(
            source = %source.id,
            kind = if source.is_http() { "http" } else { "static" },
            timeout_ms = source.timeout_ms,
            "configured price source"
        );
    }

    let state = AppState::from_config(&config).context("building price sources")?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "binding {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!(
        addr = %listener.local_addr()?,
        "API is running on http://localhost:{}",
        config.server.port
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

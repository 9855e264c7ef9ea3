use anyhow::{Context, Result};
use clap::Parser;
use loan_guidance_core::analysis::LoanAdvisor;
use loan_guidance_core::risk::RiskModel;
use loan_guidance_server::{create_router, telemetry, AppConfig, AppState};
use tokio::signal;
use tracing::{error, info};

/// Loan guidance HTTP API
#[derive(Parser)]
#[command(name = "loan-guidance-server", version)]
struct Args {
    /// Directory holding default.toml and per-environment overrides
    #[arg(long, env = "LOAN_GUIDANCE_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Port to listen on (overrides configuration)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from(&args.config_dir)
        .with_context(|| format!("failed to load configuration from '{}'", args.config_dir))?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init_logging(&config.logging);

    let model = RiskModel::new(config.risk.clone()).context("invalid risk thresholds")?;
    let state = AppState::new(LoanAdvisor::new(model));
    info!(
        thresholds = ?state.advisor.risk_model().thresholds(),
        "risk model loaded"
    );

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Loan guidance API listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

// # dyndnsd - dyndns daemon
//
// The daemon is responsible for:
// 1. Loading and validating configuration
// 2. Initializing tracing and the runtime
// 3. Wiring the nsupdate-backed update engine
// 4. Serving the HTTP update dialects until shutdown
//
// ## Configuration
//
// A JSON file named by `DYNDNSD_CONFIG` (default `/etc/dyndnsd.json`); see
// `config.rs` for the schema.
//
// ## Example
//
// ```bash
// export DYNDNSD_CONFIG=/etc/dyndnsd.json
// dyndnsd
// ```

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::UpdateEngine;
use dyndns_nsupdate::NsupdateApplier;
use dyndnsd::api::{self, AppState};
use dyndnsd::config::DaemonConfig;

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DaemonExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DaemonExitCode> for ExitCode {
    fn from(code: DaemonExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let config = match DaemonConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return DaemonExitCode::ConfigError.into();
        }
    };

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return DaemonExitCode::ConfigError.into();
    }

    info!("Starting dyndnsd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return DaemonExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_server(config).await {
            Ok(()) => DaemonExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {e:#}");
                DaemonExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run the HTTP server until a shutdown signal arrives
async fn run_server(config: DaemonConfig) -> Result<()> {
    let applier = Arc::new(NsupdateApplier::from_config(&config.update));
    let engine = Arc::new(UpdateEngine::new(applier, config.update.clone())?);
    let app = api::router(AppState { engine });

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(
        "Serving dyndns REST services on {}",
        listener.local_addr().context("failed to get local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when SIGTERM or SIGINT arrives
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("SIGINT received"),
                _ = sigterm.recv() => info!("SIGTERM received"),
            }
        }
        Err(e) => {
            error!("Failed to setup SIGTERM handler: {e}");
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to wait for CTRL-C: {e}");
            }
        }
    }
}

/// Resolve when CTRL-C arrives (non-Unix fallback)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to wait for CTRL-C: {e}");
    }
}

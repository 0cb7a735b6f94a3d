//! Live dashboard server binary.
//!
//! Wires the counter dashboard to its HTTP surface and runs it until
//! `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `dashboard-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the shared dashboard state
//! 4. Serve HTTP + `WebSocket` until shutdown

mod error;

use std::path::Path;
use std::sync::Arc;

use dashboard_core::config::DashboardConfig;
use dashboard_observer::{AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Path of the optional configuration file, relative to the working directory.
const CONFIG_PATH: &str = "dashboard-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the server
/// fails to bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report where it
    //    came from afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("dashboard-server starting");
    if from_file {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Create shared state.
    let state = Arc::new(AppState::new());

    // 4. Serve.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    dashboard_observer::start_server(&server_config, state, shutdown_signal())
        .await
        .map_err(AppError::from)?;

    info!("dashboard-server shutdown complete");
    Ok(())
}

/// Load the dashboard configuration from [`CONFIG_PATH`].
///
/// Returns the configuration and whether it was read from disk.
fn load_config() -> Result<(DashboardConfig, bool), AppError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((DashboardConfig::from_file(config_path)?, true))
    } else {
        Ok((DashboardConfig::parse("")?, false))
    }
}

/// Resolve when the process receives `Ctrl-C`.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

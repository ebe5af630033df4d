pub mod api; // HTTP API (axum)
pub mod appointment; // Appointment book views
pub mod config;
pub mod core_state;
pub mod db;
pub mod models;
pub mod scheduling; // Slots, booking, status lifecycle, statistics, month grid

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Process entry point: logging, schema migration, then serve until Ctrl-C.
pub fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let core = Arc::new(core_state::CoreState::from_config());
    core.initialize().map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Cannot start async runtime: {e}"))?;

    runtime.block_on(async move {
        let server = api::start_api_server(core, config::bind_addr()).await?;
        tracing::info!(addr = %server.addr, "Listening");

        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for shutdown signal: {e}");
        }
        server.stop().await;
        Ok::<(), String>(())
    })
}

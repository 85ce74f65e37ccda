//! Phase Timer - A work/break countdown timer
//! 
//! This is the main entry point for the phase-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use phase_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{event_logger_task, tick_driver_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("phase_timer={},tower_http=info", config.log_level()))
        .init();

    let durations = config.durations()?;

    info!("Starting phase-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}s, break={}s",
          config.host, config.port, durations.work(), durations.rest());

    // Create application state
    let (state, fire_rx) = AppState::new(config.port, config.host.clone(), durations);
    let state = Arc::new(state);

    // Start background tasks
    tokio::spawn(event_logger_task(Arc::clone(&state)));
    tokio::spawn(tick_driver_task(Arc::clone(&state), fire_rx));

    if config.autostart {
        state.start().map_err(anyhow::Error::msg)?;
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - Start the countdown");
    info!("  POST /pause  - Pause the countdown");
    info!("  POST /reset  - Stop and restore the current phase");
    info!("  POST /toggle - Start or pause");
    info!("  GET  /status - Current phase and remaining time");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Cancel the pending schedule before exit
    if let Err(e) = state.pause() {
        tracing::warn!("Failed to stop timer on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}

//! Code Rush timer - headless countdown host
//!
//! This is the main entry point for the coderush-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use coderush_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{time_up_task, TokioScheduler},
    timer::Scheduler,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("coderush_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting coderush-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, countdown={}min, autostart={}",
          config.host, config.port, config.minutes, config.autostart);

    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::current());
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.minutes,
        scheduler,
    ));

    // Start the time-up background task
    let time_up_state = Arc::clone(&state);
    tokio::spawn(async move {
        time_up_task(time_up_state).await;
    });

    state.timer.update_display();
    if config.autostart {
        state.control("autostart", |timer| timer.start())
            .map_err(anyhow::Error::msg)?;
    }

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start        - Start or restart the countdown");
    info!("  POST /timer/pause        - Pause the countdown");
    info!("  POST /timer/resume       - Resume the countdown");
    info!("  POST /timer/reset        - Reset without starting");
    info!("  POST /pause-screen/show  - Show the pause overlay");
    info!("  POST /pause-screen/hide  - Hide the pause overlay");
    info!("  GET  /status             - Timer and page status");
    info!("  GET  /health             - Health check");

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

    state.timer.pause();
    info!("Server shutdown complete");
    Ok(())
}

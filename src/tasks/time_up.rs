//! Countdown completion background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Background task that records every countdown completion in the app state
pub async fn time_up_task(state: Arc<AppState>) {
    info!("Starting time-up task");

    let mut time_up_rx = state.time_up_tx.subscribe();

    loop {
        match time_up_rx.recv().await {
            Ok(at) => {
                info!("Time is up at {}", at.to_rfc3339());
                if let Err(e) = state.record_time_up(at) {
                    error!("Failed to record time-up: {}", e);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Time-up task lagged, {} completions not recorded", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Time-up channel closed, stopping time-up task");
                break;
            }
        }
    }
}

//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    state::AppState,
    timer::CountdownTimer,
};
use super::responses::{ApiResponse, HealthResponse, PauseScreenResponse, StatusResponse};

/// Apply a timer operation and wrap the result for the client
fn control(
    state: &AppState,
    action: &str,
    message: &str,
    operation: fn(&CountdownTimer),
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.control(action, operation) {
        Ok(timer) => {
            info!("{} endpoint called - {}", action, timer.status_label());
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start - Restart the countdown from full duration
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    control(&state, "start", "Countdown started", CountdownTimer::start)
}

/// Handle POST /timer/pause - Stop ticking, keep remaining time
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    control(&state, "pause", "Countdown paused", CountdownTimer::pause)
}

/// Handle POST /timer/resume - Continue ticking if allowed
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    control(&state, "resume", "Countdown resume requested", CountdownTimer::resume)
}

/// Handle POST /timer/reset - Back to full duration without starting
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    control(&state, "reset", "Countdown reset", CountdownTimer::reset)
}

fn set_pause_screen(state: &AppState, visible: bool) -> Result<Json<PauseScreenResponse>, StatusCode> {
    match state.set_pause_screen(visible) {
        Ok(()) => Ok(Json(PauseScreenResponse {
            visible,
            message: if visible { "Pause screen shown" } else { "Pause screen hidden" }.to_string(),
            timestamp: Utc::now(),
        })),
        Err(e) => {
            warn!("Failed to toggle pause screen: {}", e);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle POST /pause-screen/show - Show the pause overlay
pub async fn pause_screen_show_handler(State(state): State<Arc<AppState>>) -> Result<Json<PauseScreenResponse>, StatusCode> {
    set_pause_screen(&state, true)
}

/// Handle POST /pause-screen/hide - Hide the pause overlay
pub async fn pause_screen_hide_handler(State(state): State<Arc<AppState>>) -> Result<Json<PauseScreenResponse>, StatusCode> {
    set_pause_screen(&state, false)
}

/// Handle GET /status - Return timer, page and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();
    let (time_up_count, last_time_up) = state.get_time_ups();

    Json(StatusResponse {
        timer: state.timer.snapshot(),
        clock: state.clock_text(),
        pause_screen_visible: state.pause_screen_visible(),
        time_up_count,
        last_time_up,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

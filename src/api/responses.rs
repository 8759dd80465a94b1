//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a response labelled with the timer's current status
    pub fn new(message: String, timer: TimerState) -> Self {
        Self {
            status: timer.status_label().to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Pause overlay change response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseScreenResponse {
    pub visible: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Full status with timer, page and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    /// Text of the clock element, `None` if the page has no clock
    pub clock: Option<String>,
    pub pause_screen_visible: bool,
    pub time_up_count: u64,
    pub last_time_up: Option<DateTime<Utc>>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

//! Timer state snapshot

use serde::{Deserialize, Serialize};

use crate::timer::format_clock;

/// Point-in-time view of a countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Whether a repeating tick is registered
    pub running: bool,
    /// Seconds left; -1 once the countdown has completed
    pub remaining_seconds: i64,
    pub full_duration_seconds: i64,
}

impl TimerState {
    /// Create a running timer state
    pub fn running(remaining_seconds: i64, full_duration_seconds: i64) -> Self {
        Self {
            running: true,
            remaining_seconds,
            full_duration_seconds,
        }
    }

    /// Create an idle timer state
    pub fn idle(remaining_seconds: i64, full_duration_seconds: i64) -> Self {
        Self {
            running: false,
            remaining_seconds,
            full_duration_seconds,
        }
    }

    /// Whether the countdown has crossed below zero
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds < 0
    }

    /// Remaining time as `MM:SS`
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Status label used in API responses
    pub fn status_label(&self) -> &'static str {
        if self.running { "running" } else { "idle" }
    }
}

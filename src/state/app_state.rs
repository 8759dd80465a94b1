//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{HeadlessPage, TimerState};
use crate::timer::{CountdownTimer, Page, Scheduler, PAUSE_SCREEN_ID, TIMER_ELEMENT_ID};

/// Shared state of the countdown host
#[derive(Debug)]
pub struct AppState {
    /// Page the countdown renders into
    pub page: Arc<HeadlessPage>,
    /// The game-mode countdown
    pub timer: CountdownTimer,
    pub timer_duration_minutes: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Completion tracking
    pub time_up_count: Arc<Mutex<u64>>,
    pub last_time_up: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for countdown completions
    pub time_up_tx: broadcast::Sender<DateTime<Utc>>,
}

impl AppState {
    /// Create the host state with an idle countdown ticked by `scheduler`
    pub fn new(
        port: u16,
        host: String,
        timer_duration_minutes: u64,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let (time_up_tx, _) = broadcast::channel(16);
        let page = Arc::new(HeadlessPage::game_layout());
        let timer = CountdownTimer::new(
            Duration::from_secs(timer_duration_minutes * 60),
            Arc::clone(&page) as Arc<dyn Page>,
            scheduler,
        );

        let completions = time_up_tx.clone();
        timer.set_on_time_up(move || {
            // No receivers just means nobody is listening yet
            if completions.send(Utc::now()).is_err() {
                debug!("Time-up event dropped, no subscribers");
            }
        });

        Self {
            page,
            timer,
            timer_duration_minutes,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            time_up_count: Arc::new(Mutex::new(0)),
            last_time_up: Arc::new(Mutex::new(None)),
            time_up_tx,
        }
    }

    /// Run a control operation on the timer and track it as the last action
    pub fn control<F>(&self, action: &str, operation: F) -> Result<TimerState, String>
    where
        F: FnOnce(&CountdownTimer),
    {
        operation(&self.timer);
        self.record_action(action)?;
        Ok(self.timer.snapshot())
    }

    /// Show or hide the pause overlay
    pub fn set_pause_screen(&self, visible: bool) -> Result<(), String> {
        if !self.page.set_hidden(PAUSE_SCREEN_ID, !visible) {
            return Err("pause-screen element is not on the page".to_string());
        }
        info!("Pause screen {}", if visible { "shown" } else { "hidden" });
        self.record_action(if visible { "pause-screen-show" } else { "pause-screen-hide" })
    }

    /// Whether the pause overlay is currently visible
    pub fn pause_screen_visible(&self) -> bool {
        self.page.pause_screen().is_paused()
    }

    /// Text currently shown by the clock element
    pub fn clock_text(&self) -> Option<String> {
        self.page.text(TIMER_ELEMENT_ID)
    }

    /// Count a countdown completion
    pub fn record_time_up(&self, at: DateTime<Utc>) -> Result<(), String> {
        let mut count = self.time_up_count.lock()
            .map_err(|e| format!("Failed to lock time-up count: {}", e))?;
        *count += 1;
        drop(count);

        let mut last = self.last_time_up.lock()
            .map_err(|e| format!("Failed to lock last time-up: {}", e))?;
        *last = Some(at);
        Ok(())
    }

    /// Number of completions and when the last one happened
    pub fn get_time_ups(&self) -> (u64, Option<DateTime<Utc>>) {
        let count = self.time_up_count.lock().map(|c| *c).unwrap_or_default();
        let last = self.last_time_up.lock().ok().and_then(|t| *t);
        (count, last)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) -> Result<(), String> {
        let mut last_action = self.last_action.lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))?;
        *last_action = Some(action.to_string());
        drop(last_action);

        let mut last_time = self.last_action_time.lock()
            .map_err(|e| format!("Failed to lock last action time: {}", e))?;
        *last_time = Some(Utc::now());
        Ok(())
    }
}

//! Countdown timer bound to the page clock
//!
//! The timer owns its remaining seconds and at most one repeating tick
//! registration. Each tick renders the clock, then decrements unless the pause
//! overlay is showing. When the counter drops below zero the registration is
//! cleared and the completion callback runs once.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tracing::{debug, info};

use super::{
    format_clock, IntervalCallback, IntervalId, Page, Scheduler, TIMER_ELEMENT_ID,
};
use crate::state::TimerState;

/// Period between scheduled ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Zero-argument completion callback
pub type TimeUpCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle to a countdown. Clones share the same countdown.
#[derive(Clone)]
pub struct CountdownTimer {
    shared: Arc<Shared>,
}

struct Shared {
    page: Arc<dyn Page>,
    scheduler: Arc<dyn Scheduler>,
    full_duration: i64,
    /// Registered with the scheduler on every start/resume
    on_tick: IntervalCallback,
    core: Mutex<Core>,
    on_time_up: Mutex<Option<TimeUpCallback>>,
}

#[derive(Debug)]
struct Core {
    time_left: i64,
    interval: Option<IntervalId>,
}

impl CountdownTimer {
    /// Create an idle countdown of `full_duration`, rendered into `page` and
    /// ticked by `scheduler`. Sub-second precision is dropped.
    pub fn new(full_duration: Duration, page: Arc<dyn Page>, scheduler: Arc<dyn Scheduler>) -> Self {
        let full_duration = i64::try_from(full_duration.as_secs()).unwrap_or(i64::MAX);

        let shared = Arc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            let on_tick: IntervalCallback = Arc::new(move |id: IntervalId| {
                if let Some(shared) = weak.upgrade() {
                    shared.scheduled_tick(id);
                }
            });

            Shared {
                page,
                scheduler,
                full_duration,
                on_tick,
                core: Mutex::new(Core {
                    time_left: full_duration,
                    interval: None,
                }),
                on_time_up: Mutex::new(None),
            }
        });

        Self { shared }
    }

    /// Write the remaining time into the clock element, if the page has one
    pub fn update_display(&self) {
        let core = self.shared.lock_core();
        self.shared.render(core.time_left);
    }

    /// Run one tick by hand. Does nothing while no tick is registered.
    pub fn tick(&self) {
        let expired = {
            let mut core = self.shared.lock_core();
            if core.interval.is_none() {
                debug!("Tick ignored, countdown is idle");
                return;
            }
            self.shared.step(&mut core)
        };
        self.shared.finish(expired);
    }

    /// Restart from the full duration.
    ///
    /// When idle this renders and counts down once immediately, then
    /// registers the repeating tick. When already running only the counter is
    /// reset.
    pub fn start(&self) {
        let expired = {
            let mut core = self.shared.lock_core();
            core.time_left = self.shared.full_duration;

            if core.interval.is_some() {
                info!("Countdown restarted from {}s", self.shared.full_duration);
                false
            } else {
                let expired = self.shared.step(&mut core);
                if !expired {
                    self.shared.register(&mut core);
                }
                info!("Countdown started from {}s", self.shared.full_duration);
                expired
            }
        };
        self.shared.finish(expired);
    }

    /// Stop ticking without touching the remaining time
    pub fn pause(&self) {
        let mut core = self.shared.lock_core();
        if self.shared.deregister(&mut core) {
            info!("Countdown paused with {}s left", core.time_left);
        } else {
            debug!("Pause ignored, countdown is idle");
        }
    }

    /// Register the repeating tick again, unless already running or the
    /// pause overlay is showing. No immediate render.
    pub fn resume(&self) {
        let mut core = self.shared.lock_core();
        if core.interval.is_some() {
            debug!("Resume ignored, countdown is running");
            return;
        }
        if self.shared.page.pause_screen().is_paused() {
            debug!("Resume ignored, pause screen is visible");
            return;
        }
        self.shared.register(&mut core);
        info!("Countdown resumed with {}s left", core.time_left);
    }

    /// Back to the full duration, rendered, and idle
    pub fn reset(&self) {
        let mut core = self.shared.lock_core();
        core.time_left = self.shared.full_duration;
        self.shared.render(core.time_left);
        self.shared.deregister(&mut core);
        info!("Countdown reset to {}s", self.shared.full_duration);
    }

    /// Set the callback run when the countdown crosses below zero
    pub fn set_on_time_up<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        *self.shared.lock_callback() = Some(Arc::new(callback));
    }

    pub fn clear_on_time_up(&self) {
        *self.shared.lock_callback() = None;
    }

    /// Whether a repeating tick is registered
    pub fn is_running(&self) -> bool {
        self.shared.lock_core().interval.is_some()
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.shared.lock_core().time_left
    }

    pub fn full_duration_seconds(&self) -> i64 {
        self.shared.full_duration
    }

    pub fn snapshot(&self) -> TimerState {
        let core = self.shared.lock_core();
        if core.interval.is_some() {
            TimerState::running(core.time_left, self.shared.full_duration)
        } else {
            TimerState::idle(core.time_left, self.shared.full_duration)
        }
    }
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.shared.lock_core();
        f.debug_struct("CountdownTimer")
            .field("full_duration", &self.shared.full_duration)
            .field("time_left", &core.time_left)
            .field("interval", &core.interval)
            .finish()
    }
}

impl Shared {
    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_callback(&self) -> MutexGuard<'_, Option<TimeUpCallback>> {
        self.on_time_up.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(&self, time_left: i64) {
        if !self.page.set_text(TIMER_ELEMENT_ID, &format_clock(time_left)) {
            debug!("No clock element on the page, render skipped");
        }
    }

    /// Render, then count down one second unless paused.
    /// Returns `true` when this step crossed below zero.
    fn step(&self, core: &mut Core) -> bool {
        self.render(core.time_left);

        if self.page.pause_screen().is_paused() {
            debug!("Pause screen visible, holding at {}s", core.time_left);
            return false;
        }

        core.time_left -= 1;
        debug!("Countdown tick, {}s left", core.time_left);
        if core.time_left >= 0 {
            return false;
        }

        self.deregister(core);
        true
    }

    fn register(&self, core: &mut Core) {
        let id = self.scheduler.set_interval(TICK_PERIOD, Arc::clone(&self.on_tick));
        debug!("Registered {}", id);
        core.interval = Some(id);
    }

    /// Returns `true` if a registration was cleared
    fn deregister(&self, core: &mut Core) -> bool {
        match core.interval.take() {
            Some(id) => {
                self.scheduler.clear_interval(id);
                debug!("Cleared {}", id);
                true
            }
            None => false,
        }
    }

    fn scheduled_tick(&self, id: IntervalId) {
        let expired = {
            let mut core = self.lock_core();
            if core.interval != Some(id) {
                debug!("Ignoring tick from stale {}", id);
                return;
            }
            self.step(&mut core)
        };
        self.finish(expired);
    }

    /// Run the completion callback. Must be called with no lock held so the
    /// callback can drive the timer itself.
    fn finish(&self, expired: bool) {
        if !expired {
            return;
        }
        info!("Countdown reached zero");

        let callback = self.lock_callback().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let core = self.core.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = core.interval.take() {
            self.scheduler.clear_interval(id);
        }
    }
}

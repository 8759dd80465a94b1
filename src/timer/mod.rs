//! Countdown timer module
//!
//! The countdown itself plus the two collaborators it talks to: the page it
//! renders into and the scheduler that ticks it.

pub mod countdown;
pub mod page;
pub mod scheduler;

// Re-export main types
pub use countdown::{CountdownTimer, TimeUpCallback, TICK_PERIOD};
pub use page::{format_clock, Page, PauseScreen, PAUSE_SCREEN_ID, TIMER_ELEMENT_ID};
pub use scheduler::{IntervalCallback, IntervalId, ManualScheduler, Scheduler};

//! Code Rush timer - the countdown that bounds a timed game mode
//!
//! The countdown ticks once per second, can be started, paused, resumed and
//! reset, and signals once when it runs out. It renders into a page clock and
//! holds still while the page's pause overlay is showing. A small HTTP host
//! drives one countdown against a headless page.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use timer::CountdownTimer;
pub use utils::signals::shutdown_signal;

//! State management module
//! 
//! This module contains the host state, the headless page and timer snapshots.

pub mod app_state;
pub mod page_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use page_state::{Element, HeadlessPage};
pub use timer_state::TimerState;

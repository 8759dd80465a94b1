//! Background tasks module
//! 
//! This module contains the tokio tasks that drive the countdown and react to it.

pub mod interval;
pub mod time_up;

// Re-export main types
pub use interval::TokioScheduler;
pub use time_up::time_up_task;

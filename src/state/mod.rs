//! State management module
//! 
//! This module contains the shared application state wrapping the phase
//! timer, plus the read models published to observers.

pub mod app_state;
pub mod timer_event;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, SharedTimer};
pub use timer_event::TimerEvent;
pub use timer_state::TimerSnapshot;

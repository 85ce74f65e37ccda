//! Phase Timer - A work/break countdown timer
//! 
//! This library provides a countdown engine that alternates between a work
//! and a break phase, plus the state, background tasks and HTTP surface used
//! to drive it from the outside.

pub mod config;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use timer::{format_time, Phase, PhaseDurations, PhaseTimer};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;

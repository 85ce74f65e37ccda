//! Phase timer core
//!
//! This module contains the work/break countdown state machine and the
//! scheduler seam it uses to receive its once-per-second firings.

pub mod phase;
pub mod phase_timer;
pub mod scheduler;

// Re-export main types
pub use phase::{format_time, Phase, PhaseDurations};
pub use phase_timer::{PhaseTimer, TICK_PERIOD};
pub use scheduler::{IntervalScheduler, ManualScheduler, ScheduleId, Scheduler};

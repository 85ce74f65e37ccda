//! Timer snapshot read model

use serde::{Deserialize, Serialize};

use crate::timer::{Phase, PhaseTimer, Scheduler};

/// Point-in-time view of the phase timer for rendering and status reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u64,
    /// Full length of the current phase
    pub phase_seconds: u64,
    pub formatted: String,
    pub running: bool,
}

impl TimerSnapshot {
    /// Capture the current state of a timer
    pub fn capture<S: Scheduler>(timer: &PhaseTimer<S>) -> Self {
        Self {
            phase: timer.phase(),
            remaining_seconds: timer.remaining_seconds(),
            phase_seconds: timer.durations().of(timer.phase()),
            formatted: timer.formatted(),
            running: timer.is_running(),
        }
    }

    /// Label for a start/pause toggle control
    pub fn toggle_label(&self) -> &'static str {
        if self.running { "Pause" } else { "Start" }
    }

    /// Phase name with a leading capital, as shown next to the clock
    pub fn phase_label(&self) -> String {
        let name = self.phase.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

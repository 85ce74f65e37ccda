//! Notifications emitted by the phase timer

use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// One observer notification, as broadcast to background listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A second elapsed, or the timer was reset
    Tick { formatted: String, phase: Phase },
    /// The timer moved into a new phase
    PhaseSwitch { phase: Phase, formatted: String },
}

impl TimerEvent {
    pub fn phase(&self) -> Phase {
        match self {
            TimerEvent::Tick { phase, .. } | TimerEvent::PhaseSwitch { phase, .. } => *phase,
        }
    }

    pub fn formatted(&self) -> &str {
        match self {
            TimerEvent::Tick { formatted, .. } | TimerEvent::PhaseSwitch { formatted, .. } => {
                formatted
            }
        }
    }
}

//! Phase definitions and time formatting

use std::{fmt, num::NonZeroU64};

use serde::{Deserialize, Serialize};

/// Default work phase length in seconds (25 minutes)
pub const DEFAULT_WORK_SECONDS: u64 = 1500;
/// Default break phase length in seconds (5 minutes)
pub const DEFAULT_BREAK_SECONDS: u64 = 300;

/// One of the two named intervals the timer alternates between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }

    /// The phase that follows this one
    pub fn toggled(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed lengths of the work and break phases, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    work: NonZeroU64,
    rest: NonZeroU64,
}

impl PhaseDurations {
    pub fn new(work: NonZeroU64, rest: NonZeroU64) -> Self {
        Self { work, rest }
    }

    /// Build from raw second counts, returning `None` if either is zero
    pub fn from_secs(work: u64, rest: u64) -> Option<Self> {
        Some(Self::new(NonZeroU64::new(work)?, NonZeroU64::new(rest)?))
    }

    pub fn work(&self) -> u64 {
        self.work.get()
    }

    pub fn rest(&self) -> u64 {
        self.rest.get()
    }

    /// Full length of the given phase
    pub fn of(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work(),
            Phase::Break => self.rest(),
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::new(DEFAULT_WORK, DEFAULT_BREAK)
    }
}

const fn non_zero(seconds: u64) -> NonZeroU64 {
    match NonZeroU64::new(seconds) {
        Some(n) => n,
        None => panic!("phase duration must be non-zero"),
    }
}

const DEFAULT_WORK: NonZeroU64 = non_zero(DEFAULT_WORK_SECONDS);
const DEFAULT_BREAK: NonZeroU64 = non_zero(DEFAULT_BREAK_SECONDS);

/// Render a second count as `MM:SS`.
///
/// Minutes are not capped at 59, so long counts simply widen the minute
/// field (`6000` renders as `100:00`).
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

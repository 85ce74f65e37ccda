//! Work/break countdown state machine
//!
//! The timer holds no thread of its own. [`PhaseTimer::start`] asks its
//! [`Scheduler`] for a one-second periodic schedule, and whoever receives
//! the scheduler's firings hands them back through [`PhaseTimer::fire`].
//!
//! ## State machines
//!
//! ```text
//! phase: Work <-> Break        (remaining reaches 0, or switch_mode)
//! run:   Idle -> Running       (start)
//!        Running -> Idle       (pause, reset)
//! ```

use std::{fmt, time::Duration};
use tracing::{debug, info};

use super::{
    phase::{format_time, Phase, PhaseDurations},
    scheduler::{ScheduleId, Scheduler},
};

/// Period of the countdown schedule
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

type TickObserver = Box<dyn FnMut(&str, Phase) + Send>;
type PhaseSwitchObserver = Box<dyn FnMut(Phase, &str) + Send>;

/// Countdown engine alternating between a work and a break phase.
///
/// Invariants:
/// - `remaining_seconds` never exceeds the current phase's duration
/// - the timer is running exactly when it holds a schedule id
pub struct PhaseTimer<S: Scheduler> {
    durations: PhaseDurations,
    phase: Phase,
    remaining_seconds: u64,
    schedule: Option<ScheduleId>,
    scheduler: S,
    on_tick: TickObserver,
    on_phase_switch: PhaseSwitchObserver,
}

impl<S: Scheduler> PhaseTimer<S> {
    /// Create an idle timer at the start of a work phase
    pub fn new(durations: PhaseDurations, scheduler: S) -> Self {
        Self {
            durations,
            phase: Phase::Work,
            remaining_seconds: durations.of(Phase::Work),
            schedule: None,
            scheduler,
            on_tick: Box::new(|_, _| {}),
            on_phase_switch: Box::new(|_, _| {}),
        }
    }

    /// Observer called with `(formatted_time, phase)` for every elapsed
    /// second and on reset
    pub fn on_tick<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&str, Phase) + Send + 'static,
    {
        self.on_tick = Box::new(observer);
        self
    }

    /// Observer called with `(new_phase, formatted_time)` on every phase switch
    pub fn on_phase_switch<F>(mut self, observer: F) -> Self
    where
        F: FnMut(Phase, &str) + Send + 'static,
    {
        self.on_phase_switch = Box::new(observer);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Remaining time rendered as `MM:SS`
    pub fn formatted(&self) -> String {
        format_time(self.remaining_seconds)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Begin counting down. Does nothing if already running.
    pub fn start(&mut self) {
        if self.schedule.is_some() {
            return;
        }
        let id = self.scheduler.start_periodic(TICK_PERIOD);
        self.schedule = Some(id);
        info!(
            "Timer started in {} phase with {} remaining",
            self.phase,
            self.formatted()
        );
    }

    /// Stop counting down, keeping the remaining time. Does nothing if idle.
    pub fn pause(&mut self) {
        if let Some(id) = self.schedule.take() {
            self.scheduler.cancel_periodic(id);
            info!("Timer paused at {} in {} phase", self.formatted(), self.phase);
        }
    }

    /// Stop the timer and restore the current phase's full duration
    pub fn reset(&mut self) {
        if let Some(id) = self.schedule.take() {
            self.scheduler.cancel_periodic(id);
        }
        self.remaining_seconds = self.durations.of(self.phase);

        let formatted = self.formatted();
        info!("Timer reset to {} in {} phase", formatted, self.phase);
        (self.on_tick)(&formatted, self.phase);
    }

    /// Move to the other phase with its full duration. Run state is untouched.
    pub fn switch_mode(&mut self) {
        self.phase = self.phase.toggled();
        self.remaining_seconds = self.durations.of(self.phase);

        let formatted = self.formatted();
        info!("Switched to {} phase ({})", self.phase, formatted);
        (self.on_phase_switch)(self.phase, &formatted);
    }

    fn auto_switch_mode(&mut self) {
        if self.remaining_seconds == 0 {
            self.switch_mode();

            if self.is_running() {
                // Already holding a schedule, so this keeps the countdown
                // going into the new phase rather than re-arming it.
                self.start();
            }
        }
    }

    /// Count down one second.
    ///
    /// The second that reaches zero produces only the phase switch
    /// notification; `on_tick` never reports `00:00` for a countdown.
    pub fn tick(&mut self) {
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            if self.remaining_seconds > 0 {
                let formatted = self.formatted();
                debug!("Tick: {} ({})", formatted, self.phase);
                (self.on_tick)(&formatted, self.phase);
            }
        }

        self.auto_switch_mode();
    }

    /// Deliver one firing of a periodic schedule.
    ///
    /// Returns whether the firing belonged to the active schedule and
    /// ticked the timer. Firings from a cancelled schedule that were
    /// already queued are dropped here.
    pub fn fire(&mut self, id: ScheduleId) -> bool {
        if self.schedule != Some(id) {
            debug!("Ignoring firing from inactive schedule {:?}", id);
            return false;
        }
        self.tick();
        true
    }
}

impl<S: Scheduler> Drop for PhaseTimer<S> {
    fn drop(&mut self) {
        if let Some(id) = self.schedule.take() {
            self.scheduler.cancel_periodic(id);
        }
    }
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for PhaseTimer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseTimer")
            .field("durations", &self.durations)
            .field("phase", &self.phase)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("running", &self.is_running())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

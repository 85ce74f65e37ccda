//! Periodic scheduling capability used by the phase timer

use std::{collections::HashMap, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, trace};

/// Opaque identifier of one periodic schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(u64);

/// Something that can fire a callback every `period` until cancelled.
///
/// Firings are not delivered through the trait itself. Each implementation
/// decides how a firing reaches [`PhaseTimer::fire`](super::PhaseTimer::fire).
pub trait Scheduler {
    /// Begin a new periodic schedule and return its id
    fn start_periodic(&mut self, period: Duration) -> ScheduleId;

    /// Stop a schedule. Unknown or already cancelled ids are ignored.
    fn cancel_periodic(&mut self, id: ScheduleId);
}

/// Tokio-backed scheduler.
///
/// Every schedule is a spawned task driving a `tokio::time::interval`; each
/// elapsed period sends the schedule's id down an unbounded channel whose
/// receiver is handed back by [`IntervalScheduler::new`].
#[derive(Debug)]
pub struct IntervalScheduler {
    fire_tx: mpsc::UnboundedSender<ScheduleId>,
    next_id: u64,
    tasks: HashMap<ScheduleId, JoinHandle<()>>,
}

impl IntervalScheduler {
    /// Create a scheduler together with the receiving end of its firings
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScheduleId>) {
        let (fire_tx, fire_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            fire_tx,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (scheduler, fire_rx)
    }

    /// Number of schedules whose tasks are still held
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for IntervalScheduler {
    fn start_periodic(&mut self, period: Duration) -> ScheduleId {
        self.next_id += 1;
        let id = ScheduleId(self.next_id);
        let fire_tx = self.fire_tx.clone();

        let handle = tokio::spawn(async move {
            // First firing lands one full period after the schedule starts
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                trace!("Schedule {:?} fired", id);
                if fire_tx.send(id).is_err() {
                    debug!("Firing receiver dropped, ending schedule {:?}", id);
                    break;
                }
            }
        });

        debug!("Started periodic schedule {:?} every {:?}", id, period);
        self.tasks.insert(id, handle);
        id
    }

    fn cancel_periodic(&mut self, id: ScheduleId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
            debug!("Cancelled periodic schedule {:?}", id);
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

/// Scheduler that never fires on its own.
///
/// Callers simulate elapsed seconds by calling `tick` or `fire` on the timer
/// directly, which makes countdown behaviour testable without wall-clock
/// delay.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<ScheduleId>,
    started: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules started and not yet cancelled
    pub fn active(&self) -> &[ScheduleId] {
        &self.active
    }

    /// Total number of schedules ever started
    pub fn started(&self) -> usize {
        self.started
    }

    /// Total number of schedules cancelled
    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn start_periodic(&mut self, _period: Duration) -> ScheduleId {
        self.next_id += 1;
        self.started += 1;
        let id = ScheduleId(self.next_id);
        self.active.push(id);
        id
    }

    fn cancel_periodic(&mut self, id: ScheduleId) {
        let before = self.active.len();
        self.active.retain(|active| *active != id);
        if self.active.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_scheduler_tracks_active_schedules() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.start_periodic(Duration::from_secs(1));
        let second = scheduler.start_periodic(Duration::from_secs(1));
        assert_ne!(first, second);
        assert_eq!(scheduler.active(), &[first, second]);

        scheduler.cancel_periodic(first);
        scheduler.cancel_periodic(first);
        assert_eq!(scheduler.active(), &[second]);
        assert_eq!(scheduler.started(), 2);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_scheduler_fires_once_per_period() {
        let (mut scheduler, mut fire_rx) = IntervalScheduler::new();
        let started = Instant::now();
        let id = scheduler.start_periodic(Duration::from_secs(1));

        assert_eq!(fire_rx.recv().await, Some(id));
        assert_eq!(started.elapsed(), Duration::from_secs(1));
        assert_eq!(fire_rx.recv().await, Some(id));
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_schedule_stops_firing() {
        let (mut scheduler, mut fire_rx) = IntervalScheduler::new();
        let id = scheduler.start_periodic(Duration::from_secs(1));
        assert_eq!(fire_rx.recv().await, Some(id));

        scheduler.cancel_periodic(id);
        assert_eq!(scheduler.active(), 0);

        let next = tokio::time::timeout(Duration::from_secs(5), fire_rx.recv()).await;
        assert!(next.is_err(), "no firing expected after cancel");
    }
}

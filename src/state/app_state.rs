//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use super::{TimerEvent, TimerSnapshot};
use crate::timer::{IntervalScheduler, PhaseDurations, PhaseTimer, ScheduleId};

/// The phase timer as shared between HTTP handlers and background tasks
pub type SharedTimer = PhaseTimer<IntervalScheduler>;

/// Main application state that owns the phase timer and its notification channels
#[derive(Debug)]
pub struct AppState {
    /// The single phase timer; every operation goes through this lock
    pub timer: Arc<Mutex<SharedTimer>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for tick and phase switch notifications
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Channel holding the latest timer snapshot
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create the application state together with the receiver of the
    /// timer's scheduled firings, which the tick driver task consumes.
    ///
    /// Must be called within a tokio runtime, since starting the timer
    /// spawns its interval task.
    pub fn new(
        port: u16,
        host: String,
        durations: PhaseDurations,
    ) -> (Self, mpsc::UnboundedReceiver<ScheduleId>) {
        let (event_tx, _) = broadcast::channel(100);
        let (scheduler, fire_rx) = IntervalScheduler::new();

        let tick_tx = event_tx.clone();
        let switch_tx = event_tx.clone();
        let timer = PhaseTimer::new(durations, scheduler)
            .on_tick(move |formatted, phase| {
                // No subscribers is fine; events are advisory
                let _ = tick_tx.send(TimerEvent::Tick {
                    formatted: formatted.to_string(),
                    phase,
                });
            })
            .on_phase_switch(move |phase, formatted| {
                let _ = switch_tx.send(TimerEvent::PhaseSwitch {
                    phase,
                    formatted: formatted.to_string(),
                });
            });

        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::capture(&timer));

        let state = Self {
            timer: Arc::new(Mutex::new(timer)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };
        (state, fire_rx)
    }

    /// Apply an operation to the timer, record it as the last action and
    /// publish the resulting snapshot
    pub fn update_timer<F>(&self, action: &str, operation: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut SharedTimer),
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        operation(&mut *timer);
        let snapshot = TimerSnapshot::capture(&*timer);
        drop(timer); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Start the countdown
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        info!("Start requested");
        self.update_timer("start", |timer| timer.start())
    }

    /// Pause the countdown, keeping the remaining time
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        info!("Pause requested");
        self.update_timer("pause", |timer| timer.pause())
    }

    /// Stop the countdown and restore the current phase's full duration
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        info!("Reset requested");
        self.update_timer("reset", |timer| timer.reset())
    }

    /// Start if idle, pause if running
    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        info!("Toggle requested");
        self.update_timer("toggle", |timer| {
            if timer.is_running() {
                timer.pause();
            } else {
                timer.start();
            }
        })
    }

    /// Deliver a scheduled firing to the timer.
    ///
    /// Returns `Ok(false)` when the firing came from a cancelled schedule.
    pub fn fire(&self, id: ScheduleId) -> Result<bool, String> {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        if !timer.fire(id) {
            return Ok(false);
        }
        let snapshot = TimerSnapshot::capture(&*timer);
        drop(timer);

        self.publish_snapshot(snapshot);
        Ok(true)
    }

    /// Get current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| TimerSnapshot::capture(&*timer))
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Subscribe to tick and phase switch notifications
    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the latest timer snapshot
    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn publish_snapshot(&self, snapshot: TimerSnapshot) {
        debug!("Publishing snapshot: {:?}", snapshot);
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send timer snapshot: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    fn test_state() -> (AppState, mpsc::UnboundedReceiver<ScheduleId>) {
        AppState::new(0, "127.0.0.1".to_string(), PhaseDurations::default())
    }

    #[tokio::test(start_paused = true)]
    async fn controls_update_snapshot_and_last_action() {
        let (state, _fire_rx) = test_state();
        let snapshots = state.subscribe_snapshots();

        let started = state.start().unwrap();
        assert!(started.running);
        assert!(snapshots.borrow().running);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));

        let toggled = state.toggle().unwrap();
        assert!(!toggled.running);
        assert_eq!(toggled.toggle_label(), "Start");
        assert_eq!(state.get_last_action().0.as_deref(), Some("toggle"));
    }

    #[tokio::test(start_paused = true)]
    async fn firings_count_down_and_broadcast_ticks() {
        let (state, mut fire_rx) = test_state();
        let mut events = state.subscribe_events();
        state.start().unwrap();

        for _ in 0..3 {
            let id = fire_rx.recv().await.unwrap();
            assert!(state.fire(id).unwrap());
        }

        let snapshot = state.get_timer_snapshot().unwrap();
        assert_eq!(snapshot.remaining_seconds, 1497);
        assert_eq!(state.subscribe_snapshots().borrow().formatted, "24:57");
        assert_eq!(
            events.recv().await.unwrap(),
            TimerEvent::Tick { formatted: "24:59".to_string(), phase: Phase::Work }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reset_broadcasts_full_duration() {
        let (state, mut fire_rx) = test_state();
        let mut events = state.subscribe_events();
        state.start().unwrap();
        let id = fire_rx.recv().await.unwrap();
        state.fire(id).unwrap();

        let snapshot = state.reset().unwrap();
        assert!(!snapshot.running);
        assert_eq!(snapshot.formatted, "25:00");
        assert!(!state.fire(id).unwrap());

        let _first_tick = events.recv().await.unwrap();
        assert_eq!(events.recv().await.unwrap().formatted(), "25:00");
    }
}
